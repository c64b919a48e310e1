use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use likert_layout::tabulate::Responses;

use crate::plot::{io_common::responses_from_rows, *};

/// Reads one column per question from a worksheet, with the questions in the first row.
///
/// The first worksheet is used when no name is given.
pub fn read_xlsx_responses(path: &str, worksheet_name: Option<&str>) -> PlotResult<Responses> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu {})?
        .iter()
        .enumerate()
        .map(|(idx, cell)| match read_cell(cell, 1) {
            Ok(Some(s)) => Ok(s),
            Ok(None) => Ok(format!("Question {}", idx + 1)),
            Err(e) => Err(e),
        })
        .collect::<PlotResult<Vec<String>>>()?;
    debug!("read_xlsx_responses: header: {:?}", header);

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        debug!("read_xlsx_responses: lineno: {:?} row: {:?}", lineno, row);
        let answers = row
            .iter()
            .map(|cell| read_cell(cell, lineno))
            .collect::<PlotResult<Vec<Option<String>>>>()?;
        rows.push(answers);
    }
    Ok(responses_from_rows(&header, &rows))
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> PlotResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { path, name })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(wrange)
}

/// Answers recorded as whole numbers (1.0) are read as the number (1).
fn read_cell(cell: &DataType, lineno: usize) -> PlotResult<Option<String>> {
    match cell {
        DataType::String(s) if s.trim().is_empty() => Ok(None),
        DataType::String(s) => Ok(Some(s.clone())),
        DataType::Int(i) => Ok(Some(i.to_string())),
        DataType::Float(f) if f.fract() == 0.0 => Ok(Some(format!("{}", *f as i64))),
        DataType::Float(f) => Ok(Some(f.to_string())),
        DataType::Bool(b) => Ok(Some(b.to_string())),
        DataType::Empty => Ok(None),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_cell(&DataType::Float(3.0), 2).unwrap(), Some("3".to_string()));
        assert_eq!(read_cell(&DataType::Float(2.5), 2).unwrap(), Some("2.5".to_string()));
        assert_eq!(read_cell(&DataType::Int(4), 2).unwrap(), Some("4".to_string()));
        assert_eq!(
            read_cell(&DataType::String("Agree".to_string()), 2).unwrap(),
            Some("Agree".to_string())
        );
        assert_eq!(read_cell(&DataType::String("  ".to_string()), 2).unwrap(), None);
        assert_eq!(read_cell(&DataType::Empty, 2).unwrap(), None);
        assert!(matches!(
            read_cell(&DataType::DateTime(44000.0), 7),
            Err(PlotError::ExcelWrongCellType { lineno: 7, .. })
        ));
    }

    #[test]
    fn missing_workbook() {
        assert!(matches!(
            read_xlsx_responses("/nonexistent/likertplot/none.xlsx", None),
            Err(PlotError::OpeningExcel { .. })
        ));
    }
}
