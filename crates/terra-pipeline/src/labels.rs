//! Label-set knowledge for the eco-detection domain.
//!
//! The generic pretrained checkpoint carries the 80-class COCO label set;
//! the custom-trained model carries the eco-action label set. The quick-test
//! path needs to know which eco categories the generic checkpoint can and
//! cannot detect.

/// Categories the custom eco-detection model is trained to recognize.
pub const ECO_CLASSES: [&str; 7] = [
    "bicycle",
    "ev_charger",
    "potted_plant",
    "recycling_bin",
    "reusable_bag",
    "solar_panel",
    "tree",
];

/// The standard COCO-80 label set, in checkpoint class-index order.
pub const COCO_CLASSES: [&str; 80] = [
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "stop sign", "parking meter", "bench", "bird", "cat", "dog",
    "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "backpack", "umbrella",
    "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard", "sports ball", "kite",
    "baseball bat", "baseball glove", "skateboard", "surfboard", "tennis racket", "bottle",
    "wine glass", "cup", "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich",
    "orange", "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch",
    "potted plant", "bed", "dining table", "toilet", "tv", "laptop", "mouse", "remote",
    "keyboard", "cell phone", "microwave", "oven", "toaster", "sink", "refrigerator", "book",
    "clock", "vase", "scissors", "teddy bear", "hair drier", "toothbrush",
];

/// Look up a label in the COCO set, tolerating underscore naming.
#[must_use]
pub fn coco_index(label: &str) -> Option<usize> {
    let normalized = label.replace('_', " ");
    COCO_CLASSES.iter().position(|c| *c == normalized)
}

/// Eco categories the generic COCO checkpoint can detect, with their
/// COCO class indices.
#[must_use]
pub fn coco_overlap() -> Vec<(&'static str, usize)> {
    ECO_CLASSES
        .iter()
        .filter_map(|label| coco_index(label).map(|idx| (*label, idx)))
        .collect()
}

/// Eco categories absent from the COCO label set, hence undetectable by
/// the generic checkpoint.
#[must_use]
pub fn undetectable_with_coco() -> Vec<&'static str> {
    ECO_CLASSES
        .iter()
        .filter(|label| coco_index(label).is_none())
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_bicycle_and_potted_plant() {
        let overlap = coco_overlap();
        assert_eq!(overlap, vec![("bicycle", 1), ("potted_plant", 58)]);
    }

    #[test]
    fn test_undetectable_covers_domain_specific_categories() {
        let undetectable = undetectable_with_coco();
        for label in ["tree", "solar_panel", "ev_charger", "recycling_bin", "reusable_bag"] {
            assert!(undetectable.contains(&label), "{label} should be undetectable");
        }
        assert_eq!(undetectable.len(), 5);
    }

    #[test]
    fn test_coco_index_normalizes_underscores() {
        assert_eq!(coco_index("potted_plant"), Some(58));
        assert_eq!(coco_index("potted plant"), Some(58));
        assert_eq!(coco_index("solar_panel"), None);
    }
}
