//! Color palettes for the bars.
//!
//! Every palette starts with [`TRANSPARENT`], the color of the padding segment,
//! followed by one color per category from the most negative to the most positive.

use crate::config::LayoutErrors;

pub const TRANSPARENT: &str = "#ffffff00";

pub const DEFAULT: &[&str] = &[
    TRANSPARENT,
    "firebrick",
    "lightcoral",
    "gainsboro",
    "cornflowerblue",
    "darkblue",
];

pub const DEFAULT_WITH_DARKER_NEUTRAL: &[&str] = &[
    TRANSPARENT,
    "firebrick",
    "lightcoral",
    "silver",
    "cornflowerblue",
    "darkblue",
];

/// The default palette without the neutral color.
pub const LIKERT4: &[&str] = &[
    TRANSPARENT,
    "firebrick",
    "lightcoral",
    "cornflowerblue",
    "darkblue",
];

pub const LIKERT5: &[&str] = &[
    TRANSPARENT,
    "#d8a539",
    "#efe0c1",
    "lightgray",
    "#bde1dd",
    "#5ab4ac",
];

pub const LIKERT6: &[&str] = &[
    TRANSPARENT,
    "#d8a539",
    "#dfc283",
    "#efe0c1",
    "#def0ee",
    "#7bc3bc",
    "#5ab4ac",
];

pub const LIKERT7: &[&str] = &[
    TRANSPARENT,
    "#d8a539",
    "#dfc283",
    "#efe0c1",
    "lightgray",
    "#bde1dd",
    "#7bc3bc",
    "#5ab4ac",
];

pub const LIKERT8: &[&str] = &[
    TRANSPARENT,
    "#d8b365",
    "#dfc283",
    "#e7d1a2",
    "#efe0c1",
    "#bde1dd",
    "#9cd2cd",
    "#7bc3bc",
    "#5ab4ac",
];

pub const LIKERT9: &[&str] = &[
    TRANSPARENT,
    "#d8b365",
    "#dfc283",
    "#e7d1a2",
    "#efe0c1",
    "lightgray",
    "#bde1dd",
    "#9cd2cd",
    "#7bc3bc",
    "#5ab4ac",
];

pub const LIKERT10: &[&str] = &[
    TRANSPARENT,
    "#d8b365",
    "#dfc283",
    "#e7d1a2",
    "#efe0c1",
    "#f7efe0",
    "#def0ee",
    "#bde1dd",
    "#9cd2cd",
    "#7bc3bc",
    "#5ab4ac",
];

/// The color of the text written inside the bars.
pub const DEFAULT_LABEL_COLOR: &str = "white";

const ALL_PALETTES: &[(&str, &[&str])] = &[
    ("default", DEFAULT),
    ("default_with_darker_neutral", DEFAULT_WITH_DARKER_NEUTRAL),
    ("likert4", LIKERT4),
    ("likert5", LIKERT5),
    ("likert6", LIKERT6),
    ("likert7", LIKERT7),
    ("likert8", LIKERT8),
    ("likert9", LIKERT9),
    ("likert10", LIKERT10),
];

pub fn by_name(name: &str) -> Option<&'static [&'static str]> {
    ALL_PALETTES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, palette)| *palette)
}

/// The palette that fits a scale of the given size, if there is one.
pub fn for_categories(num_categories: usize) -> Option<&'static [&'static str]> {
    ALL_PALETTES
        .iter()
        .map(|(_, palette)| *palette)
        .find(|palette| palette.len() == num_categories + 1)
}

/// The colors of the padding column followed by those of each category.
pub fn chart_colors(
    palette: &[&str],
    num_categories: usize,
) -> Result<Vec<String>, LayoutErrors> {
    if palette.len() < num_categories + 1 {
        return Err(LayoutErrors::InvalidInput(format!(
            "the palette has {} colors but {} are needed (one for the padding and one per category)",
            palette.len(),
            num_categories + 1
        )));
    }
    Ok(palette[..num_categories + 1]
        .iter()
        .map(|c| c.to_string())
        .collect())
}
