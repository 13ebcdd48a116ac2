use serde::{Deserialize, Serialize};

/// Pipeline stage events emitted by the drivers.
///
/// The external toolchain writes its own training/export progress straight
/// to the operator's terminal; these events only mark the stages this crate
/// owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    StageStarted { stage: String },
    Message { stage: String, text: String },
    StageFinished { stage: String },
}

pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: PipelineEvent);
}

#[derive(Debug, Default)]
pub struct StdoutProgressSink;

impl ProgressSink for StdoutProgressSink {
    fn on_event(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::StageStarted { stage } => println!("[{stage}] started"),
            PipelineEvent::Message { stage, text } => println!("[{stage}] {text}"),
            PipelineEvent::StageFinished { stage } => println!("[{stage}] finished"),
        }
    }
}

/// Sink that discards every event; used by callers that render their own
/// status output.
#[derive(Debug, Default)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn on_event(&self, _event: PipelineEvent) {}
}
