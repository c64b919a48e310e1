// ********* Input data structures ***********

use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;

/// The label of the category that stands for a missing answer.
///
/// When a scale contains it, it must be the first category.
pub const NO_RESPONSE: &str = "0";

/// An ordered set of answers, from the most negative to the most positive.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Scale {
    categories: Vec<String>,
}

impl Scale {
    pub fn new(categories: &[&str]) -> Result<Scale, LayoutErrors> {
        Scale::from_labels(categories.iter().map(|s| s.to_string()).collect())
    }

    /// Builds a scale, checking that the labels are unique and that the no-response
    /// category, if present, comes first.
    pub fn from_labels(categories: Vec<String>) -> Result<Scale, LayoutErrors> {
        if categories.is_empty() {
            return Err(LayoutErrors::InvalidInput(
                "a scale needs at least one category".to_string(),
            ));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for (idx, c) in categories.iter().enumerate() {
            if !seen.insert(c.as_str()) {
                return Err(LayoutErrors::InvalidInput(format!(
                    "category {:?} appears more than once in the scale",
                    c
                )));
            }
            if c == NO_RESPONSE && idx > 0 {
                return Err(LayoutErrors::InvalidInput(format!(
                    "the no-response category {:?} must be the first one, found at position {}",
                    NO_RESPONSE, idx
                )));
            }
        }
        Ok(Scale { categories })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.categories.iter().any(|c| c == value)
    }

    pub fn position(&self, value: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == value)
    }

    pub fn has_no_response(&self) -> bool {
        self.categories.first().map(|c| c == NO_RESPONSE) == Some(true)
    }

    /// The same scale with the leading no-response category removed (if any).
    pub fn without_no_response(&self) -> Result<Scale, LayoutErrors> {
        if self.has_no_response() {
            Scale::from_labels(self.categories[1..].to_vec())
        } else {
            Ok(self.clone())
        }
    }
}

/// What the numbers in a response table stand for.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TableKind {
    Counts,
    /// Each row sums to 100 (or 0 when nobody answered).
    Percentages,
}

/// What the renderer declares it is able to draw.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct RendererCapabilities {
    /// The number of tick labels that fit horizontally on the axis.
    pub tick_slots: usize,
    pub bar_labels: bool,
}

impl RendererCapabilities {
    pub const DEFAULT: RendererCapabilities = RendererCapabilities {
        tick_slots: 10,
        bar_labels: true,
    };
}

// ********* Configuration **********

#[derive(PartialEq, Debug, Clone)]
pub struct LayoutOptions {
    /// Normalizes every row to 100 before laying it out.
    pub compute_percentages: bool,
    /// Overrides the automatic choice of the tick interval.
    pub xtick_interval: Option<f64>,
    /// Computes a value label for every segment large enough to hold one.
    pub bar_labels: bool,
    /// Gap between the largest midpoint and the center, as a fraction of the largest row total.
    pub center_margin_fraction: f64,
    /// Empty space left of the bars, as a fraction of the largest row total.
    pub left_margin_fraction: f64,
    /// Empty space right of the bars, as a fraction of the largest row total.
    pub right_margin_fraction: f64,
    /// Segments smaller than this fraction of the largest row total get no label.
    pub label_size_cutoff_fraction: f64,
    pub renderer: RendererCapabilities,
}

impl LayoutOptions {
    pub const DEFAULT_OPTIONS: LayoutOptions = LayoutOptions {
        compute_percentages: false,
        xtick_interval: None,
        bar_labels: false,
        center_margin_fraction: 0.05,
        left_margin_fraction: 0.02,
        right_margin_fraction: 0.04,
        label_size_cutoff_fraction: 0.05,
        renderer: RendererCapabilities::DEFAULT,
    };
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions::DEFAULT_OPTIONS
    }
}

// ******** Output data structures *********

/// One row of the padded table handed to the renderer.
#[derive(PartialEq, Debug, Clone)]
pub struct PaddedRow {
    pub question: String,
    /// Width of the invisible leading segment.
    pub padding: f64,
    /// One value per category, in scale order.
    pub values: Vec<f64>,
}

/// The table to draw: rows are in display order (last question first) so that
/// a renderer stacking bars from the bottom shows the first question on top.
#[derive(PartialEq, Debug, Clone)]
pub struct PaddedTable {
    pub categories: Vec<String>,
    pub rows: Vec<PaddedRow>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Tick {
    pub position: f64,
    /// Empty when the tick would suggest data that does not exist.
    pub label: String,
}

/// The text to write inside a bar segment.
#[derive(PartialEq, Debug, Clone)]
pub struct SegmentLabel {
    /// Index of the row in the padded table.
    pub row: usize,
    pub category: String,
    /// Horizontal center of the segment.
    pub position: f64,
    pub value: f64,
    /// Empty when the segment is too small.
    pub text: String,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Layout {
    pub center: f64,
    /// Per input row, in input order.
    pub middle_values: Vec<f64>,
    /// Per input row, in input order.
    pub padding_values: Vec<f64>,
    /// Largest row total, padding excluded.
    pub total_max: f64,
    /// Largest row total, padding included.
    pub max_width: f64,
    pub interval: f64,
    /// Sorted by position.
    pub ticks: Vec<Tick>,
    pub axis_padding_left: f64,
    pub axis_padding_right: f64,
    pub x_limits: (f64, f64),
    pub axis_title: String,
    pub bar_labels: Vec<SegmentLabel>,
}

/// Everything the renderer needs to draw one chart.
#[derive(PartialEq, Debug, Clone)]
pub struct DivergingChart {
    pub table: PaddedTable,
    pub layout: Layout,
    pub warnings: Vec<LayoutWarning>,
}

/// Conditions worth reporting that do not prevent the layout.
#[derive(PartialEq, Debug, Clone)]
pub enum LayoutWarning {
    /// The questions do not all have the same number of answers, so their
    /// percentages are not directly comparable.
    Comparability { totals: Vec<(String, f64)> },
}

impl Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutWarning::Comparability { totals } => {
                write!(
                    f,
                    "Not all (sub)questions have the same number of responses ({}). Therefore, percentages aren't directly comparable.",
                    totals
                        .iter()
                        .map(|(q, t)| format!("{:?}: {}", q, t))
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
        }
    }
}

/// A single disagreement between the data and the scale.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum ScaleViolation {
    /// A response that is not part of the scale.
    UnknownResponse { question: String, value: String },
    /// A scale category without a column in the table.
    MissingCategory(String),
    /// A column that is not a scale category.
    UnexpectedCategory(String),
    /// A scale category that appears in more than one column.
    DuplicateCategory(String),
    /// The table has the right categories but not in scale order.
    OutOfOrder {
        position: usize,
        expected: String,
        found: String,
    },
}

impl Display for ScaleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleViolation::UnknownResponse { question, value } => {
                write!(f, "{:?} (question {:?}) is not in the scale", value, question)
            }
            ScaleViolation::MissingCategory(c) => write!(f, "category {:?} is missing", c),
            ScaleViolation::UnexpectedCategory(c) => {
                write!(f, "column {:?} is not in the scale", c)
            }
            ScaleViolation::DuplicateCategory(c) => {
                write!(f, "column {:?} appears more than once", c)
            }
            ScaleViolation::OutOfOrder {
                position,
                expected,
                found,
            } => write!(
                f,
                "column {} is {:?} but the scale expects {:?}",
                position, found, expected
            ),
        }
    }
}

/// Errors that prevent a layout from being computed.
#[derive(PartialEq, Debug, Clone)]
pub enum LayoutErrors {
    InvalidInput(String),
    ScaleMismatch(Vec<ScaleViolation>),
    RendererCapability(String),
}

impl Error for LayoutErrors {}

impl Display for LayoutErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutErrors::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            LayoutErrors::ScaleMismatch(violations) => {
                write!(f, "The data does not match the scale: ")?;
                let msgs: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", msgs.join("; "))
            }
            LayoutErrors::RendererCapability(msg) => {
                write!(f, "The renderer cannot do this: {}", msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_rejects_duplicates() {
        let res = Scale::new(&["Agree", "Disagree", "Agree"]);
        assert!(matches!(res, Err(LayoutErrors::InvalidInput(_))));
    }

    #[test]
    fn scale_rejects_late_sentinel() {
        let res = Scale::new(&["1", "0", "2"]);
        assert!(matches!(res, Err(LayoutErrors::InvalidInput(_))));
        assert!(Scale::new(&[]).is_err());
    }

    #[test]
    fn scale_sentinel_removal() {
        let s = Scale::new(&["0", "1", "2", "3"]).unwrap();
        assert!(s.has_no_response());
        let s2 = s.without_no_response().unwrap();
        assert_eq!(s2.categories(), &["1", "2", "3"]);
        assert!(!s2.has_no_response());
        assert_eq!(s2.without_no_response().unwrap(), s2);
    }

    #[test]
    fn scale_mismatch_lists_every_violation() {
        let e = LayoutErrors::ScaleMismatch(vec![
            ScaleViolation::MissingCategory("Agree".to_string()),
            ScaleViolation::UnexpectedCategory("Maybe".to_string()),
        ]);
        let msg = e.to_string();
        assert!(msg.contains("\"Agree\""));
        assert!(msg.contains("\"Maybe\""));
    }
}
