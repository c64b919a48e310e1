// Primitives for reading CSV files.

use std::fs::File;

use likert_layout::tabulate::{wrap_label, Responses};
use likert_layout::{ResponseTable, TableKind};

use crate::plot::{io_common::responses_from_rows, *};

/// Reads one column per question, with the questions in the first row.
pub fn read_csv_responses(path: &str) -> PlotResult<Responses> {
    let mut records = get_records(path)?;
    let header: Vec<String> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineParseSnafu {})?
            .iter()
            .map(|s| s.to_string())
            .collect(),
        None => {
            whatever!("The file {} is empty", path)
        }
    };
    debug!("read_csv_responses: header: {:?}", header);

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_responses: lineno: {:?} row: {:?}", idx + 2, line);
        let row: Vec<Option<String>> = line
            .iter()
            .map(|s| {
                if s.trim().is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    Ok(responses_from_rows(&header, &rows))
}

/// Reads answers that are already counted: the categories in the first row (after an
/// empty cell), then one line per question starting with the question.
pub fn read_csv_counts(path: &str, label_max_width: usize) -> PlotResult<ResponseTable> {
    let mut records = get_records(path)?;
    let header = match records.next() {
        Some(line_r) => line_r.context(CsvLineParseSnafu {})?,
        None => {
            whatever!("The file {} is empty", path)
        }
    };
    let categories: Vec<String> = header.iter().skip(1).map(|s| s.to_string()).collect();
    debug!("read_csv_counts: categories: {:?}", categories);

    let mut table = ResponseTable::with_categories(categories.clone(), TableKind::Counts);
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        let question = line.get(0).context(CsvLineTooShortSnafu { lineno })?;
        let mut values: Vec<f64> = Vec::new();
        for cidx in 0..categories.len() {
            let cell = line.get(cidx + 1).unwrap_or("").trim();
            let v = if cell.is_empty() {
                0.0
            } else {
                cell.parse::<f64>().ok().context(CsvNumberSnafu {
                    lineno,
                    content: cell,
                })?
            };
            values.push(v);
        }
        debug!("read_csv_counts: lineno: {:?} values: {:?}", lineno, values);
        table
            .add_row(&wrap_label(question, label_max_width), &values)
            .context(LayoutSnafu {})?;
    }
    Ok(table)
}

fn get_records(path: &str) -> PlotResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    Ok(rdr.into_records())
}
