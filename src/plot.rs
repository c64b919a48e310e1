use log::{debug, info, warn};

use likert_layout::tabulate::{likert_counts, likert_response};
use likert_layout::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::plot::config_reader::*;

mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum PlotError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet named {name}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("The worksheet is empty"))]
    EmptyExcel {},
    #[snafu(display("Line {lineno}: could not understand cell {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: {content:?} is not a number"))]
    CsvNumber { lineno: usize, content: String },
    #[snafu(display("Error reading file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("{content} is not a number"))]
    ParsingJsonNumber { content: String },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    Layout { source: LayoutErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type PlotResult<T> = Result<T, PlotError>;

/// A chart ready to be handed to the renderer.
#[derive(PartialEq, Debug, Clone)]
struct PreparedChart {
    input: String,
    scale: Scale,
    chart: DivergingChart,
    colors: Vec<String>,
}

fn resolve_path(base_dir: Option<&Path>, file_path: &str) -> String {
    match base_dir {
        Some(dir) if Path::new(file_path).is_relative() => {
            let p: PathBuf = [dir, Path::new(file_path)].iter().collect();
            p.as_path().display().to_string()
        }
        _ => file_path.to_string(),
    }
}

fn read_table(config: &PlotConfig, path: &str, scale: &Scale) -> PlotResult<ResponseTable> {
    let tab_options = config.tabulate_options();
    info!("Attempting to read file {:?}", path);
    let responses = match config.input_type().as_str() {
        "csv" => io_csv::read_csv_responses(path)?,
        "xlsx" => io_xlsx::read_xlsx_responses(path, config.excel_worksheet_name.as_deref())?,
        "counts_csv" => {
            if config.format_scale.is_some() {
                warn!("The format scale is ignored for counted answers");
            }
            let table = io_csv::read_csv_counts(path, tab_options.label_max_width)?;
            if tab_options.drop_zero_category {
                return table.drop_category(NO_RESPONSE).context(LayoutSnafu {});
            }
            return Ok(table);
        }
        x => {
            whatever!("Input type not implemented {:?}", x)
        }
    };

    let responses = match config.format_scale.as_deref() {
        Some(name) => {
            let format_scale = scales::resolve(Some(name), &[]).context(LayoutSnafu {})?;
            likert_response(&responses, &format_scale)
        }
        None => responses,
    };
    likert_counts(&responses, scale, &tab_options).context(LayoutSnafu {})
}

fn prepare_chart(config: &PlotConfig, base_dir: Option<&Path>) -> PlotResult<PreparedChart> {
    let input = match &config.input {
        Some(p) => resolve_path(base_dir, p),
        None => {
            whatever!("No input file given (use --input or the input key of the configuration)")
        }
    };
    let choices: Vec<String> = config.choices.clone().unwrap_or_default();
    let scale = scales::resolve(config.scale.as_deref(), &choices).context(LayoutSnafu {})?;

    let table = read_table(config, &input, &scale)?;
    // The no-response column is gone from the table, it must go from the scale as well.
    let plot_scale = if config.drop_zero_category() {
        scale.without_no_response().context(LayoutSnafu {})?
    } else {
        scale
    };
    debug!("prepare_chart: table: {:?}", table);

    let options = config.layout_options()?;
    let chart = compute_layout(&table, &plot_scale, &options).context(LayoutSnafu {})?;

    let palette = match config.palette.as_deref() {
        Some(name) => match colors::by_name(name) {
            Some(p) => p,
            None => {
                whatever!("Unknown color palette {:?}", name)
            }
        },
        None => colors::for_categories(plot_scale.len()).unwrap_or(colors::LIKERT10),
    };
    let colors = colors::chart_colors(palette, plot_scale.len()).context(LayoutSnafu {})?;

    Ok(PreparedChart {
        input: io_common::simplify_file_name(&input),
        scale: plot_scale,
        chart,
        colors,
    })
}

fn chart_to_json(config: &PlotConfig, pc: &PreparedChart) -> JSValue {
    let layout = &pc.chart.layout;

    let mut columns: Vec<String> = vec!["".to_string()];
    columns.extend(pc.chart.table.categories.iter().cloned());
    let rows: Vec<JSValue> = pc
        .chart
        .table
        .rows
        .iter()
        .map(|r| {
            let mut values: Vec<f64> = vec![r.padding];
            values.extend(r.values.iter().cloned());
            json!({"question": r.question, "values": values})
        })
        .collect();

    let ticks: Vec<JSValue> = layout
        .ticks
        .iter()
        .map(|t| json!({"position": t.position, "label": t.label}))
        .collect();

    let bar_labels: Vec<JSValue> = layout
        .bar_labels
        .iter()
        .map(|bl| {
            json!({
                "row": bl.row,
                "category": bl.category,
                "position": bl.position,
                "value": bl.value,
                "text": bl.text
            })
        })
        .collect();

    let mut axis: JSMap<String, JSValue> = JSMap::new();
    axis.insert("title".to_string(), json!(layout.axis_title));
    axis.insert("paddingLeft".to_string(), json!(layout.axis_padding_left));
    axis.insert("paddingRight".to_string(), json!(layout.axis_padding_right));
    axis.insert(
        "limits".to_string(),
        json!([layout.x_limits.0, layout.x_limits.1]),
    );

    let warnings: Vec<String> = pc.chart.warnings.iter().map(|w| w.to_string()).collect();

    json!({
        "config": {
            "input": pc.input,
            "scale": pc.scale.categories(),
            "percentages": config.compute_percentages(),
            "figureSize": config.figure_size.map(|(w, h)| vec![w, h]),
        },
        "table": {"columns": columns, "rows": rows},
        "colors": pc.colors,
        "legend": pc.chart.table.categories,
        "center": layout.center,
        "interval": layout.interval,
        "ticks": ticks,
        "axis": axis,
        "barLabels": bar_labels,
        "labelColor": colors::DEFAULT_LABEL_COLOR,
        "warnings": warnings,
    })
}

fn write_output(out: Option<&str>, contents: &str) -> PlotResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", contents);
            Ok(())
        }
        Some(path) => {
            info!("Writing chart description to {:?}", path);
            fs::write(path, contents).context(WritingOutputSnafu { path })
        }
    }
}

fn check_reference(reference_path: &str, pretty_js: &str) -> PlotResult<()> {
    let reference = read_reference(reference_path)?;
    let pretty_reference = serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    if pretty_reference != pretty_js {
        warn!("Found differences with the reference file");
        print_diff(pretty_reference.as_str(), pretty_js, "\n");
        whatever!("Difference detected between the computed chart and the reference chart")
    }
    Ok(())
}

pub fn run_plot(args: &Args) -> PlotResult<()> {
    let (config, base_dir) = match &args.config {
        Some(config_path) => {
            let c = read_config(config_path)?;
            let base = Path::new(config_path.as_str())
                .parent()
                .map(|p| p.to_path_buf());
            (c, base)
        }
        None => (PlotConfig::default(), None),
    };
    // Paths given on the command line are relative to the working directory.
    let base_dir = if args.input.is_some() { None } else { base_dir };
    let config = config.merge_args(args);
    info!("config: {:?}", config);

    let pc = prepare_chart(&config, base_dir.as_deref())?;

    let result_js = chart_to_json(&config, &pc);
    let pretty_js = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_output(config.out.as_deref(), &pretty_js)?;

    // The reference chart, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js)?;
    }
    Ok(())
}
