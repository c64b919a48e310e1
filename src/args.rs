use clap::Parser;

/// Lays out diverging stacked-bar charts for Likert-style survey responses.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with all the options of the chart. Options given on the
    /// command line take precedence over the ones in this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the expected chart description in JSON format. If provided,
    /// likertplot will check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the chart description will be written in JSON format to
    /// the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The file containing the survey responses.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv, counts_csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (name) One of the predefined scales, for example agree5 or scores7_0.
    #[clap(short, long, value_parser)]
    pub scale: Option<String>,

    /// (list of values) The answers of the scale, from the most negative to the most positive. Use it
    /// instead of --scale for scales that are not predefined.
    #[clap(long, value_parser)]
    pub choices: Option<Vec<String>>,

    /// (name) A predefined scale used to turn numeric answers (0, 1, 2, ...) into labels.
    #[clap(long, value_parser)]
    pub format_scale: Option<String>,

    /// Normalizes the answers of every question to 100.
    #[clap(long, takes_value = false)]
    pub percentages: bool,

    /// Removes the no-response category (0) from the chart.
    #[clap(long, takes_value = false)]
    pub drop_zero_category: bool,

    /// Writes the number of answers inside the bars.
    #[clap(long, takes_value = false)]
    pub bar_labels: bool,

    /// (number) The spacing of the ticks. Chosen automatically if not given.
    #[clap(long, value_parser)]
    pub interval: Option<f64>,

    /// (default 10) The number of tick labels that fit on the horizontal axis.
    #[clap(long, value_parser)]
    pub tick_slots: Option<usize>,

    /// (default 30) The questions are wrapped to this number of characters.
    #[clap(long, value_parser)]
    pub label_max_width: Option<usize>,

    /// (name) The color palette. Chosen from the size of the scale if not given.
    #[clap(long, value_parser)]
    pub palette: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
