pub mod colors;
mod config;
mod interval;
pub mod manual;
pub mod scales;
mod table;
pub mod tabulate;

use log::{debug, info};

pub use crate::config::*;
pub use crate::interval::{candidate_intervals, select_interval, Interval};
pub use crate::table::ResponseTable;

// Beyond this, the tick interval given by the user is too small to be of any use.
const MAX_TICKS_PER_SIDE: usize = 10_000;

// Tolerance when comparing tick offsets with the data.
const TICK_EPSILON: f64 = 1e-9;

/// Computes where each bar goes so that all the rows share one center line.
///
/// Arguments:
/// * `table` the responses, one column per category of `scale`. It is not modified.
/// * `scale` the categories, from the most negative to the most positive
/// * `options` the layout parameters and what the renderer is able to draw
pub fn compute_layout(
    table: &ResponseTable,
    scale: &Scale,
    options: &LayoutOptions,
) -> Result<DivergingChart, LayoutErrors> {
    info!(
        "compute_layout: {:?} questions, scale: {:?}, options: {:?}",
        table.num_rows(),
        scale.categories(),
        options
    );
    check_options(options)?;

    if table.is_empty() {
        return Err(LayoutErrors::InvalidInput(
            "cannot lay out a chart without any question".to_string(),
        ));
    }
    let violations = table.check_categories(scale);
    if !violations.is_empty() {
        return Err(LayoutErrors::ScaleMismatch(violations));
    }

    let mut warnings: Vec<LayoutWarning> = Vec::new();
    let working: ResponseTable = if options.compute_percentages {
        let (pct, warning) = table.to_percentages();
        warnings.extend(warning);
        pct
    } else {
        table.clone()
    };
    let is_percentage = working.kind() == TableKind::Percentages;

    let middle_values: Vec<f64> = working
        .rows()
        .iter()
        .map(|row| middle_value(row, scale.len()))
        .collect();
    let totals = working.row_totals();
    let total_max = totals.iter().cloned().fold(0.0, f64::max);
    let middle_max = middle_values.iter().cloned().fold(0.0, f64::max);

    let center = middle_max + options.center_margin_fraction * total_max;
    let padding_values: Vec<f64> = middle_values.iter().map(|m| (m - center).abs()).collect();
    let max_width = padding_values
        .iter()
        .zip(totals.iter())
        .map(|(p, t)| p + t)
        .fold(0.0, f64::max);
    debug!(
        "compute_layout: middles: {:?} totals: {:?} center: {:?} max_width: {:?}",
        middle_values, totals, center, max_width
    );

    let right_extent = (max_width - center).max(0.0);
    let interval = match options.xtick_interval {
        Some(x) => x,
        None => select_interval(options.renderer.tick_slots, right_extent)?.value(),
    };
    let ticks = make_ticks(center, right_extent, interval, total_max, is_percentage)?;

    let axis_padding_left = total_max * options.left_margin_fraction;
    let axis_padding_right = total_max * options.right_margin_fraction;

    // The renderer stacks from the bottom: the last question goes first.
    let padded_rows: Vec<PaddedRow> = working
        .questions()
        .iter()
        .zip(working.rows().iter())
        .zip(padding_values.iter())
        .rev()
        .map(|((question, values), padding)| PaddedRow {
            question: question.clone(),
            padding: *padding,
            values: values.clone(),
        })
        .collect();

    let bar_labels = if options.bar_labels {
        segment_labels(
            &padded_rows,
            working.categories(),
            total_max * options.label_size_cutoff_fraction,
            is_percentage,
        )
    } else {
        Vec::new()
    };

    let axis_title = if is_percentage {
        "Percentage of Responses"
    } else {
        "Number of Responses"
    };

    let layout = Layout {
        center,
        middle_values,
        padding_values,
        total_max,
        max_width,
        interval,
        ticks,
        axis_padding_left,
        axis_padding_right,
        x_limits: (-axis_padding_left, max_width + axis_padding_right),
        axis_title: axis_title.to_string(),
        bar_labels,
    };
    info!(
        "compute_layout: center: {} interval: {} ticks: {}",
        layout.center,
        layout.interval,
        layout.ticks.len()
    );

    Ok(DivergingChart {
        table: PaddedTable {
            categories: working.categories().to_vec(),
            rows: padded_rows,
        },
        layout,
        warnings,
    })
}

fn check_options(options: &LayoutOptions) -> Result<(), LayoutErrors> {
    if options.bar_labels && !options.renderer.bar_labels {
        return Err(LayoutErrors::RendererCapability(
            "bar labels were requested but the renderer cannot draw them".to_string(),
        ));
    }
    if let Some(x) = options.xtick_interval {
        if !x.is_finite() || x <= 0.0 {
            return Err(LayoutErrors::InvalidInput(format!(
                "the tick interval must be a positive number, got {}",
                x
            )));
        }
    }
    let fractions = [
        ("center margin", options.center_margin_fraction),
        ("left margin", options.left_margin_fraction),
        ("right margin", options.right_margin_fraction),
        ("label size cutoff", options.label_size_cutoff_fraction),
    ];
    for (name, f) in fractions.iter() {
        if !f.is_finite() || *f < 0.0 {
            return Err(LayoutErrors::InvalidInput(format!(
                "the {} fraction must be a non-negative number, got {}",
                name, f
            )));
        }
    }
    Ok(())
}

/// The amount of responses left of the middle of the scale.
///
/// With an odd number of categories, the middle one straddles the center and
/// contributes half of its value.
fn middle_value(row: &[f64], scale_len: usize) -> f64 {
    let half = scale_len / 2;
    let left: f64 = row[..half].iter().sum();
    if scale_len % 2 == 1 {
        left + row[half] / 2.0
    } else {
        left
    }
}

fn format_value(v: f64, is_percentage: bool) -> String {
    let n = v.round() as i64;
    if is_percentage {
        format!("{}%", n)
    } else {
        format!("{}", n)
    }
}

// Ticks are symmetric around the center: 0 and multiples of the interval on the left,
// multiples of the interval on the right.
fn make_ticks(
    center: f64,
    right_extent: f64,
    interval: f64,
    total_max: f64,
    is_percentage: bool,
) -> Result<Vec<Tick>, LayoutErrors> {
    let left_offsets = offsets(0, center, interval)?;
    let right_offsets = offsets(1, right_extent, interval)?;

    let label = |offset: f64| -> String {
        if offset > total_max + TICK_EPSILON {
            String::new()
        } else {
            format_value(offset, is_percentage)
        }
    };

    let mut ticks: Vec<Tick> = Vec::new();
    for off in left_offsets.iter().rev() {
        ticks.push(Tick {
            position: center - off,
            label: label(*off),
        });
    }
    for off in right_offsets.iter() {
        ticks.push(Tick {
            position: center + off,
            label: label(*off),
        });
    }
    debug!("make_ticks: {:?}", ticks);
    Ok(ticks)
}

fn offsets(first: usize, limit: f64, interval: f64) -> Result<Vec<f64>, LayoutErrors> {
    let mut res: Vec<f64> = Vec::new();
    let mut k = first;
    loop {
        let off = k as f64 * interval;
        if off > limit + TICK_EPSILON * limit.max(1.0) {
            break;
        }
        if res.len() >= MAX_TICKS_PER_SIDE {
            return Err(LayoutErrors::InvalidInput(format!(
                "a tick interval of {} produces too many ticks for {}",
                interval, limit
            )));
        }
        res.push(off);
        k += 1;
    }
    Ok(res)
}

fn segment_labels(
    rows: &[PaddedRow],
    categories: &[String],
    cutoff: f64,
    is_percentage: bool,
) -> Vec<SegmentLabel> {
    let mut res: Vec<SegmentLabel> = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let mut start = row.padding;
        for (category, value) in categories.iter().zip(row.values.iter()) {
            // A segment without any response has no room for text either.
            let text = if *value >= cutoff && *value > 0.0 {
                format_value(*value, is_percentage)
            } else {
                String::new()
            };
            res.push(SegmentLabel {
                row: row_idx,
                category: category.clone(),
                position: start + value / 2.0,
                value: *value,
                text,
            });
            start += value;
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn table(scale: &Scale, rows: &[(&str, &[f64])]) -> ResponseTable {
        let mut t = ResponseTable::new(scale, TableKind::Counts);
        for (q, values) in rows {
            t.add_row(q, values).unwrap();
        }
        t
    }

    fn labels(chart: &DivergingChart) -> Vec<String> {
        chart.layout.ticks.iter().map(|t| t.label.clone()).collect()
    }

    fn positions(chart: &DivergingChart) -> Vec<f64> {
        chart.layout.ticks.iter().map(|t| t.position).collect()
    }

    #[test]
    fn three_point_scale() {
        let _ = env_logger::builder().is_test(true).try_init();
        let scale = Scale::new(&["Disagree", "Neutral", "Agree"]).unwrap();
        let t = table(&scale, &[("q1", &[10.0, 5.0, 15.0])]);
        let chart = compute_layout(&t, &scale, &LayoutOptions::DEFAULT_OPTIONS).unwrap();
        let l = &chart.layout;

        assert_eq!(l.middle_values, vec![12.5]);
        // 5% of the 30 responses.
        assert_approx_eq!(f64, l.center, 12.5 + 1.5, epsilon = 1e-9);
        assert_approx_eq!(f64, l.padding_values[0], 1.5, epsilon = 1e-9);
        assert_approx_eq!(f64, l.max_width, 31.5, epsilon = 1e-9);
        // 17.5 on the right with 5 ticks per side.
        assert_eq!(l.interval, 5.0);
        assert_eq!(labels(&chart), vec!["10", "5", "0", "5", "10", "15"]);
        let expected = [4.0, 9.0, 14.0, 19.0, 24.0, 29.0];
        for (p, e) in positions(&chart).iter().zip(expected.iter()) {
            assert_approx_eq!(f64, *p, *e, epsilon = 1e-9);
        }
        assert_eq!(l.axis_title, "Number of Responses");
        assert_approx_eq!(f64, l.axis_padding_left, 0.6, epsilon = 1e-9);
        assert_approx_eq!(f64, l.axis_padding_right, 1.2, epsilon = 1e-9);
        assert_approx_eq!(f64, l.x_limits.0, -0.6, epsilon = 1e-9);
        assert_approx_eq!(f64, l.x_limits.1, 32.7, epsilon = 1e-9);
        assert!(l.bar_labels.is_empty());
        assert!(chart.warnings.is_empty());
    }

    #[test]
    fn five_point_scale() {
        let scale = scales::by_name("agree5").unwrap();
        let t = table(
            &scale,
            &[
                ("first", &[20.0, 10.0, 5.0, 10.0, 20.0]),
                ("second", &[0.0, 0.0, 5.0, 0.0, 0.0]),
            ],
        );
        let chart = compute_layout(&t, &scale, &LayoutOptions::DEFAULT_OPTIONS).unwrap();
        let l = &chart.layout;
        assert_eq!(l.middle_values, vec![32.5, 2.5]);
        let margin = 0.05 * 65.0;
        assert_approx_eq!(f64, l.center, 32.5 + margin, epsilon = 1e-9);
        assert_approx_eq!(f64, l.padding_values[1], l.center - 2.5, epsilon = 1e-9);
        for (m, p) in l.middle_values.iter().zip(l.padding_values.iter()) {
            assert!(l.center >= *m);
            assert_approx_eq!(f64, m + p, l.center, epsilon = 1e-9);
        }
        // The right extent is 32.5: 10 * 5 ticks is the first fit.
        assert_eq!(l.interval, 10.0);
        assert_eq!(
            labels(&chart),
            vec!["30", "20", "10", "0", "10", "20", "30"]
        );

        // First question on top, i.e. last in the padded table.
        let rows = &chart.table.rows;
        assert_eq!(rows[0].question, "second");
        assert_eq!(rows[1].question, "first");
        assert_approx_eq!(f64, rows[1].padding, margin, epsilon = 1e-9);
        assert_eq!(chart.table.categories, scale.categories());
    }

    #[test]
    fn even_scale_splits_between_the_central_categories() {
        let scale = scales::by_name("scores6").unwrap();
        let t = table(
            &scale,
            &[
                ("a", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
                ("b", &[6.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ],
        );
        let chart = compute_layout(&t, &scale, &LayoutOptions::DEFAULT_OPTIONS).unwrap();
        assert_eq!(chart.layout.middle_values, vec![6.0, 6.0]);
        assert_approx_eq!(f64, chart.layout.center, 6.0 + 0.05 * 21.0, epsilon = 1e-9);
        assert_approx_eq!(
            f64,
            chart.layout.padding_values[0],
            chart.layout.padding_values[1],
            epsilon = 1e-12
        );
    }

    #[test]
    fn tick_labels_stop_at_the_largest_total() {
        let scale = Scale::new(&["Disagree", "Neutral", "Agree"]).unwrap();
        let t = table(
            &scale,
            &[("left", &[10.0, 0.0, 0.0]), ("right", &[0.0, 0.0, 10.0])],
        );
        // A wide margin puts left ticks past the largest total: offset 10 keeps its
        // label, offset 11 is blank.
        let options = LayoutOptions {
            xtick_interval: Some(1.0),
            center_margin_fraction: 0.2,
            ..LayoutOptions::DEFAULT_OPTIONS
        };
        let chart = compute_layout(&t, &scale, &options).unwrap();
        let l = &chart.layout;
        // Center at 10 + 2, so the left side goes up to 12.
        assert_approx_eq!(f64, l.center, 12.0, epsilon = 1e-9);
        let left: Vec<&Tick> = l.ticks.iter().filter(|t| t.position < l.center).collect();
        assert_eq!(left.len(), 12);
        // Sorted by position: offsets 12 and 11 come first.
        assert_eq!(left[0].label, "");
        assert_eq!(left[1].label, "");
        assert_eq!(left[2].label, "10");
        assert_approx_eq!(f64, left[2].position, 2.0, epsilon = 1e-9);
        // The tick mark is kept even without a label.
        assert_approx_eq!(f64, left[0].position, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn percentages() {
        let _ = env_logger::builder().is_test(true).try_init();
        let scale = Scale::new(&["Disagree", "Neutral", "Agree"]).unwrap();
        let t = table(
            &scale,
            &[("a", &[1.0, 1.0, 2.0]), ("b", &[5.0, 0.0, 5.0])],
        );
        let options = LayoutOptions {
            compute_percentages: true,
            ..LayoutOptions::DEFAULT_OPTIONS
        };
        let chart = compute_layout(&t, &scale, &options).unwrap();
        assert_eq!(chart.warnings.len(), 1);
        assert!(matches!(
            chart.warnings[0],
            LayoutWarning::Comparability { .. }
        ));
        for row in chart.table.rows.iter() {
            assert_approx_eq!(f64, row.values.iter().sum::<f64>(), 100.0, epsilon = 1e-9);
        }
        assert!(chart.layout.ticks.iter().all(|t| t.label.is_empty() || t.label.ends_with('%')));
        assert_eq!(chart.layout.axis_title, "Percentage of Responses");
        // The input still holds counts.
        assert_eq!(t.rows()[0], vec![1.0, 1.0, 2.0]);
        assert_eq!(t.kind(), TableKind::Counts);
    }

    #[test]
    fn bar_labels_skip_small_segments() {
        let scale = Scale::new(&["Disagree", "Neutral", "Agree"]).unwrap();
        let t = table(&scale, &[("q", &[40.0, 2.0, 58.0])]);
        let options = LayoutOptions {
            bar_labels: true,
            ..LayoutOptions::DEFAULT_OPTIONS
        };
        let chart = compute_layout(&t, &scale, &options).unwrap();
        let bl = &chart.layout.bar_labels;
        assert_eq!(bl.len(), 3);
        assert_eq!(bl[0].text, "40");
        // 2 < 5% of 100
        assert_eq!(bl[1].text, "");
        assert_eq!(bl[1].value, 2.0);
        assert_eq!(bl[2].text, "58");
        let padding = chart.layout.padding_values[0];
        assert_approx_eq!(f64, bl[0].position, padding + 20.0, epsilon = 1e-9);
        assert_approx_eq!(f64, bl[1].position, padding + 41.0, epsilon = 1e-9);
        assert_approx_eq!(f64, bl[2].position, padding + 71.0, epsilon = 1e-9);
    }

    #[test]
    fn bar_labels_at_the_cutoff() {
        let scale = Scale::new(&["Disagree", "Neutral", "Agree"]).unwrap();
        // Both rows total 100, so the cutoff is 5.
        let t = table(
            &scale,
            &[("at", &[45.0, 5.0, 50.0]), ("below", &[45.5, 4.5, 50.0])],
        );
        let options = LayoutOptions {
            bar_labels: true,
            ..LayoutOptions::DEFAULT_OPTIONS
        };
        let chart = compute_layout(&t, &scale, &options).unwrap();
        let text = |row: usize, category: &str| -> String {
            chart
                .layout
                .bar_labels
                .iter()
                .find(|bl| bl.row == row && bl.category == category)
                .map(|bl| bl.text.clone())
                .unwrap()
        };
        // Rows are reversed: "below" is row 0.
        assert_eq!(text(1, "Disagree"), "45");
        assert_eq!(text(1, "Neutral"), "5");
        assert_eq!(text(1, "Agree"), "50");
        assert_eq!(text(0, "Neutral"), "");
    }

    #[test]
    fn repeated_column_is_a_scale_mismatch() {
        let scale = Scale::new(&["Disagree", "Agree"]).unwrap();
        let mut t = ResponseTable::with_categories(
            vec![
                "Disagree".to_string(),
                "Agree".to_string(),
                "Agree".to_string(),
            ],
            TableKind::Counts,
        );
        t.add_row("q", &[1.0, 2.0, 3.0]).unwrap();
        match compute_layout(&t, &scale, &LayoutOptions::DEFAULT_OPTIONS) {
            Err(LayoutErrors::ScaleMismatch(v)) => {
                assert_eq!(v, vec![ScaleViolation::DuplicateCategory("Agree".to_string())])
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn bar_labels_need_a_capable_renderer() {
        let scale = Scale::new(&["Disagree", "Agree"]).unwrap();
        let t = table(&scale, &[("q", &[1.0, 2.0])]);
        let options = LayoutOptions {
            bar_labels: true,
            renderer: RendererCapabilities {
                tick_slots: 10,
                bar_labels: false,
            },
            ..LayoutOptions::DEFAULT_OPTIONS
        };
        assert!(matches!(
            compute_layout(&t, &scale, &options),
            Err(LayoutErrors::RendererCapability(_))
        ));
    }

    #[test]
    fn empty_table() {
        let scale = Scale::new(&["Disagree", "Agree"]).unwrap();
        let t = ResponseTable::new(&scale, TableKind::Counts);
        assert!(matches!(
            compute_layout(&t, &scale, &LayoutOptions::DEFAULT_OPTIONS),
            Err(LayoutErrors::InvalidInput(_))
        ));
    }

    #[test]
    fn columns_must_match_the_scale() {
        let scale = Scale::new(&["Disagree", "Neutral", "Agree"]).unwrap();
        let other = Scale::new(&["Disagree", "Agree"]).unwrap();
        let t = table(&other, &[("q", &[1.0, 2.0])]);
        match compute_layout(&t, &scale, &LayoutOptions::DEFAULT_OPTIONS) {
            Err(LayoutErrors::ScaleMismatch(v)) => {
                assert_eq!(v, vec![ScaleViolation::MissingCategory("Neutral".to_string())]);
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn bad_interval_override() {
        let scale = Scale::new(&["Disagree", "Agree"]).unwrap();
        let t = table(&scale, &[("q", &[1.0, 2.0])]);
        for x in [0.0, -5.0, f64::NAN] {
            let options = LayoutOptions {
                xtick_interval: Some(x),
                ..LayoutOptions::DEFAULT_OPTIONS
            };
            assert!(compute_layout(&t, &scale, &options).is_err());
        }
        let options = LayoutOptions {
            xtick_interval: Some(1e-9),
            ..LayoutOptions::DEFAULT_OPTIONS
        };
        assert!(compute_layout(&t, &scale, &options).is_err());
    }

    #[test]
    fn nobody_answered() {
        let scale = Scale::new(&["Disagree", "Agree"]).unwrap();
        let t = table(&scale, &[("q", &[0.0, 0.0])]);
        let chart = compute_layout(&t, &scale, &LayoutOptions::DEFAULT_OPTIONS).unwrap();
        assert_eq!(chart.layout.center, 0.0);
        assert_eq!(chart.layout.interval, 1.0);
        assert_eq!(labels(&chart), vec!["0"]);
    }
}
