use crate::plot::*;

use likert_layout::tabulate::TabulateOptions;
use likert_layout::{LayoutOptions, RendererCapabilities};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

use crate::args::Args;

/// The options of a chart, as written in a JSON configuration file.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlotConfig {
    pub input: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    pub out: Option<String>,
    pub scale: Option<String>,
    pub choices: Option<Vec<String>>,
    #[serde(rename = "formatScale")]
    pub format_scale: Option<String>,
    // Older name of computePercentages. Wins when both are present.
    #[serde(rename = "plotPercentage")]
    pub plot_percentage: Option<bool>,
    #[serde(rename = "computePercentages")]
    pub compute_percentages: Option<bool>,
    #[serde(rename = "dropZeroCategory")]
    pub drop_zero_category: Option<bool>,
    #[serde(rename = "barLabels")]
    pub bar_labels: Option<bool>,
    #[serde(rename = "xtickInterval")]
    _xtick_interval: Option<JSValue>,
    #[serde(rename = "tickSlots")]
    pub tick_slots: Option<usize>,
    #[serde(rename = "labelMaxWidth")]
    pub label_max_width: Option<usize>,
    pub palette: Option<String>,
    #[serde(rename = "labelSizeCutoffFraction")]
    pub label_size_cutoff_fraction: Option<f64>,
    #[serde(rename = "centerMarginFraction")]
    pub center_margin_fraction: Option<f64>,
    #[serde(rename = "leftMarginFraction")]
    pub left_margin_fraction: Option<f64>,
    #[serde(rename = "rightMarginFraction")]
    pub right_margin_fraction: Option<f64>,
    /// Not used for the layout, passed as is to the renderer.
    #[serde(rename = "figureSize")]
    pub figure_size: Option<(f64, f64)>,
}

impl PlotConfig {
    pub fn compute_percentages(&self) -> bool {
        self.plot_percentage
            .or(self.compute_percentages)
            .unwrap_or(false)
    }

    pub fn drop_zero_category(&self) -> bool {
        self.drop_zero_category.unwrap_or(false)
    }

    pub fn input_type(&self) -> String {
        self.input_type.clone().unwrap_or_else(|| "csv".to_string())
    }

    /// The tick interval may be written as a number or as a string.
    pub fn xtick_interval(&self) -> PlotResult<Option<f64>> {
        match &self._xtick_interval {
            None | Some(JSValue::Null) => Ok(None),
            Some(JSValue::Number(n)) => n.as_f64().map(Some).context(ParsingJsonNumberSnafu {
                content: n.to_string(),
            }),
            Some(JSValue::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .map(Some)
                .context(ParsingJsonNumberSnafu { content: s.clone() }),
            Some(x) => ParsingJsonNumberSnafu {
                content: x.to_string(),
            }
            .fail(),
        }
    }

    pub fn layout_options(&self) -> PlotResult<LayoutOptions> {
        let d = LayoutOptions::DEFAULT_OPTIONS;
        Ok(LayoutOptions {
            compute_percentages: self.compute_percentages(),
            xtick_interval: self.xtick_interval()?,
            bar_labels: self.bar_labels.unwrap_or(d.bar_labels),
            center_margin_fraction: self
                .center_margin_fraction
                .unwrap_or(d.center_margin_fraction),
            left_margin_fraction: self.left_margin_fraction.unwrap_or(d.left_margin_fraction),
            right_margin_fraction: self
                .right_margin_fraction
                .unwrap_or(d.right_margin_fraction),
            label_size_cutoff_fraction: self
                .label_size_cutoff_fraction
                .unwrap_or(d.label_size_cutoff_fraction),
            renderer: RendererCapabilities {
                tick_slots: self.tick_slots.unwrap_or(d.renderer.tick_slots),
                ..d.renderer
            },
        })
    }

    pub fn tabulate_options(&self) -> TabulateOptions {
        let d = TabulateOptions::DEFAULT_OPTIONS;
        TabulateOptions {
            label_max_width: self.label_max_width.unwrap_or(d.label_max_width),
            drop_zero_category: self.drop_zero_category(),
        }
    }

    /// Overrides the values of this configuration with the ones given on the command line.
    pub fn merge_args(self, args: &Args) -> PlotConfig {
        let flag = |set: bool, current: Option<bool>| if set { Some(true) } else { current };
        // A flag on the command line is the most recent way to ask for percentages.
        let plot_percentage = if args.percentages {
            None
        } else {
            self.plot_percentage
        };
        PlotConfig {
            input: args.input.clone().or(self.input),
            input_type: args.input_type.clone().or(self.input_type),
            excel_worksheet_name: args
                .excel_worksheet_name
                .clone()
                .or(self.excel_worksheet_name),
            out: args.out.clone().or(self.out),
            scale: args.scale.clone().or(self.scale),
            choices: args.choices.clone().or(self.choices),
            format_scale: args.format_scale.clone().or(self.format_scale),
            plot_percentage,
            compute_percentages: flag(args.percentages, self.compute_percentages),
            drop_zero_category: flag(args.drop_zero_category, self.drop_zero_category),
            bar_labels: flag(args.bar_labels, self.bar_labels),
            _xtick_interval: args
                .interval
                .map(|x| serde_json::json!(x))
                .or(self._xtick_interval),
            tick_slots: args.tick_slots.or(self.tick_slots),
            label_max_width: args.label_max_width.or(self.label_max_width),
            palette: args.palette.clone().or(self.palette),
            ..self
        }
    }
}

pub fn read_config(path: &str) -> PlotResult<PlotConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: PlotConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_reference(path: &str) -> PlotResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_reference: ticks: {:?}", js["ticks"].as_array());
    Ok(js)
}
