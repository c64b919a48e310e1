//! Commonly used answer scales.
//!
//! The `_0` variants start with the no-response category [`NO_RESPONSE`](crate::NO_RESPONSE),
//! for datasets in which some questions were left unanswered.

use crate::config::{LayoutErrors, Scale};

pub const AGREE5_0: &[&str] = &[
    "0",
    "Strongly disagree",
    "Disagree",
    "Neither agree nor disagree",
    "Agree",
    "Strongly agree",
];

pub const AGREE5: &[&str] = &[
    "Strongly disagree",
    "Disagree",
    "Neither agree nor disagree",
    "Agree",
    "Strongly agree",
];

pub const ACCEPTABLE5_0: &[&str] = &[
    "0",
    "Completely unacceptable",
    "Somewhat unacceptable",
    "Neutral",
    "Somewhat acceptable",
    "Completely acceptable",
];

pub const ACCEPTABLE5: &[&str] = &[
    "Completely unacceptable",
    "Somewhat unacceptable",
    "Neutral",
    "Somewhat acceptable",
    "Completely acceptable",
];

pub const SCORES5_0: &[&str] = &[
    "0",
    "1 - Strongly Disagree",
    "2 - Disagree",
    "3 - Neither Agree nor Disagree",
    "4 - Agree",
    "5 - Strongly Agree",
];

pub const SCORES5: &[&str] = &[
    "1 - Strongly Disagree",
    "2 - Disagree",
    "3 - Neither Agree nor Disagree",
    "4 - Agree",
    "5 - Strongly Agree",
];

pub const SCORES6_0: &[&str] = &[
    "0",
    "1 - Strongly Disagree",
    "2 - Disagree",
    "3 - Slightly Disagree",
    "4 - Slightly Agree",
    "5 - Agree",
    "6 - Strongly Agree",
];

pub const SCORES6: &[&str] = &[
    "1 - Strongly Disagree",
    "2 - Disagree",
    "3 - Slightly Disagree",
    "4 - Slightly Agree",
    "5 - Agree",
    "6 - Strongly Agree",
];

pub const SCORES7_0: &[&str] = &[
    "0",
    "1 - Strongly Disagree",
    "2 - Disagree",
    "3 - Slightly Disagree",
    "4 - Neither Agree nor Disagree",
    "5 - Slightly Agree",
    "6 - Agree",
    "7 - Strongly Agree",
];

pub const SCORES7: &[&str] = &[
    "1 - Strongly Disagree",
    "2 - Disagree",
    "3 - Slightly Disagree",
    "4 - Neither Agree nor Disagree",
    "5 - Slightly Agree",
    "6 - Agree",
    "7 - Strongly Agree",
];

pub const RAW5_0: &[&str] = &["0", "1", "2", "3", "4", "5"];
pub const RAW5: &[&str] = &["1", "2", "3", "4", "5"];
pub const RAW6_0: &[&str] = &["0", "1", "2", "3", "4", "5", "6"];
pub const RAW6: &[&str] = &["1", "2", "3", "4", "5", "6"];
pub const RAW7_0: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7"];
pub const RAW7: &[&str] = &["1", "2", "3", "4", "5", "6", "7"];

const ALL_SCALES: &[(&str, &[&str])] = &[
    ("agree5_0", AGREE5_0),
    ("agree5", AGREE5),
    ("agree", AGREE5),
    ("acceptable5_0", ACCEPTABLE5_0),
    ("acceptable5", ACCEPTABLE5),
    ("acceptable", ACCEPTABLE5),
    ("scores5_0", SCORES5_0),
    ("scores5", SCORES5),
    ("scores6_0", SCORES6_0),
    ("scores6", SCORES6),
    ("scores7_0", SCORES7_0),
    ("scores7", SCORES7),
    ("raw5_0", RAW5_0),
    ("raw5", RAW5),
    ("raw6_0", RAW6_0),
    ("raw6", RAW6),
    ("raw7_0", RAW7_0),
    ("raw7", RAW7),
];

pub fn names() -> Vec<&'static str> {
    ALL_SCALES.iter().map(|(name, _)| *name).collect()
}

/// Looks up a predefined scale.
pub fn by_name(name: &str) -> Option<Scale> {
    ALL_SCALES
        .iter()
        .find(|(n, _)| *n == name)
        .and_then(|(_, labels)| Scale::new(labels).ok())
}

/// A predefined scale, or a scale built from the given labels.
pub fn resolve(name: Option<&str>, labels: &[String]) -> Result<Scale, LayoutErrors> {
    match (name, labels) {
        (Some(n), []) => by_name(n).ok_or_else(|| {
            LayoutErrors::InvalidInput(format!(
                "unknown scale {:?}, known scales: {}",
                n,
                names().join(", ")
            ))
        }),
        (None, []) => Err(LayoutErrors::InvalidInput(
            "a scale name or a list of choices is required".to_string(),
        )),
        (None, ls) => Scale::from_labels(ls.to_vec()),
        (Some(n), _) => Err(LayoutErrors::InvalidInput(format!(
            "both the scale {:?} and a list of choices were given",
            n
        ))),
    }
}
