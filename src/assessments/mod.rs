// src/assessments/mod.rs
use crate::config::TestType;

pub mod default_message;

pub use default_message::{AssessmentDefaultMessageGenerator, DefaultMessageComponent, GetDefaultMessage};

#[derive(Debug)]
pub struct InstanceColumn {
    pub header: &'static str,
    pub property: &'static str, // key into the instance property bag
}

/// Which toggle sits above a step's instance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualHelperToggleKind {
    /// Page-wide overlay that is redrawn by a fresh scan.
    RestartScan,
    /// Per-instance highlights switched together.
    VisualizationEnabled,
}

#[derive(Debug)]
pub struct Requirement {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub is_manual: bool,
    pub has_visual_helper: bool,
    pub visual_helper_toggle: VisualHelperToggleKind,
    pub instance_columns: &'static [InstanceColumn],
}

#[derive(Debug)]
pub struct Assessment {
    pub test_type: TestType,
    pub title: &'static str,
    pub requirements: &'static [Requirement],
}

const HEADING_COLUMNS: &[InstanceColumn] = &[
    InstanceColumn { header: "Heading text", property: "headingText" },
    InstanceColumn { header: "Level", property: "headingLevel" },
];

const LANDMARK_COLUMNS: &[InstanceColumn] = &[
    InstanceColumn { header: "Role", property: "role" },
    InstanceColumn { header: "Label", property: "label" },
];

const IMAGE_COLUMNS: &[InstanceColumn] = &[
    InstanceColumn { header: "Image type", property: "imageType" },
    InstanceColumn { header: "Accessible name", property: "accessibleName" },
];

const LINK_COLUMNS: &[InstanceColumn] = &[
    InstanceColumn { header: "Link text", property: "text" },
    InstanceColumn { header: "Accessible name", property: "accessibleName" },
];

pub static ASSESSMENTS: &[Assessment] = &[
    Assessment {
        test_type: TestType::Headings,
        title: "Headings",
        requirements: &[
            Requirement {
                key: "headingFunction",
                name: "Heading function",
                description: "An element coded as a heading must function as a label for the content that follows it.",
                is_manual: false,
                has_visual_helper: true,
                visual_helper_toggle: VisualHelperToggleKind::VisualizationEnabled,
                instance_columns: HEADING_COLUMNS,
            },
            Requirement {
                key: "headingLevel",
                name: "Heading level",
                description: "A heading's programmatic level must match the level that's presented visually.",
                is_manual: false,
                has_visual_helper: true,
                visual_helper_toggle: VisualHelperToggleKind::VisualizationEnabled,
                instance_columns: HEADING_COLUMNS,
            },
            Requirement {
                key: "missingHeadings",
                name: "No missing headings",
                description: "Text that looks like a heading must be coded as a heading.",
                is_manual: true,
                has_visual_helper: true,
                visual_helper_toggle: VisualHelperToggleKind::RestartScan,
                instance_columns: HEADING_COLUMNS,
            },
        ],
    },
    Assessment {
        test_type: TestType::Landmarks,
        title: "Landmarks",
        requirements: &[
            Requirement {
                key: "primaryContent",
                name: "Primary content",
                description: "The main landmark must contain all of the page's primary content.",
                is_manual: false,
                has_visual_helper: true,
                visual_helper_toggle: VisualHelperToggleKind::RestartScan,
                instance_columns: LANDMARK_COLUMNS,
            },
            Requirement {
                key: "landmarkRoles",
                name: "Landmark roles",
                description: "A landmark region must have the role that best describes its content.",
                is_manual: false,
                has_visual_helper: true,
                visual_helper_toggle: VisualHelperToggleKind::VisualizationEnabled,
                instance_columns: LANDMARK_COLUMNS,
            },
        ],
    },
    Assessment {
        test_type: TestType::Images,
        title: "Images",
        requirements: &[
            Requirement {
                key: "imageFunction",
                name: "Image function",
                description: "If an image has no alt text, it must be coded as decorative.",
                is_manual: false,
                has_visual_helper: true,
                visual_helper_toggle: VisualHelperToggleKind::VisualizationEnabled,
                instance_columns: IMAGE_COLUMNS,
            },
            Requirement {
                key: "textAlternative",
                name: "Text alternative",
                description: "A meaningful image must have a text alternative that serves the equivalent purpose.",
                is_manual: false,
                has_visual_helper: false,
                visual_helper_toggle: VisualHelperToggleKind::VisualizationEnabled,
                instance_columns: IMAGE_COLUMNS,
            },
        ],
    },
    Assessment {
        test_type: TestType::Links,
        title: "Links",
        requirements: &[
            Requirement {
                key: "linkPurpose",
                name: "Link purpose",
                description: "A link's purpose must be described by its link text alone, or by the link text together with its context.",
                is_manual: false,
                has_visual_helper: true,
                visual_helper_toggle: VisualHelperToggleKind::VisualizationEnabled,
                instance_columns: LINK_COLUMNS,
            },
        ],
    },
];

pub fn assessment(test_type: TestType) -> Option<&'static Assessment> {
    ASSESSMENTS.iter().find(|a| a.test_type == test_type)
}

pub fn requirement(test_type: TestType, step: &str) -> Option<&'static Requirement> {
    assessment(test_type)?
        .requirements
        .iter()
        .find(|r| r.key == step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_test_type_has_an_assessment_with_steps() {
        for test_type in TestType::ALL {
            let found = assessment(test_type).expect("assessment missing");
            assert!(!found.requirements.is_empty(), "{} has no steps", test_type);
        }
    }

    #[test]
    fn requirement_keys_are_unique_within_an_assessment() {
        for a in ASSESSMENTS {
            let mut keys: Vec<_> = a.requirements.iter().map(|r| r.key).collect();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), a.requirements.len());
        }
    }

    #[test]
    fn requirement_lookup() {
        assert_eq!(requirement(TestType::Headings, "headingLevel").map(|r| r.name), Some("Heading level"));
        assert!(requirement(TestType::Links, "headingLevel").is_none());
    }
}
