use std::path::Path;

use likert_layout::tabulate::Responses;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Builds the responses from a header (the questions) and one row per respondent.
///
/// Rows shorter than the header are padded with missing answers.
pub fn responses_from_rows(header: &[String], rows: &[Vec<Option<String>>]) -> Responses {
    let mut res = Responses::new();
    for (idx, question) in header.iter().enumerate() {
        let column: Vec<Option<String>> = rows
            .iter()
            .map(|row| row.get(idx).cloned().flatten())
            .collect();
        res.add_question(question, &column);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/data/survey.csv"), "survey.csv");
        assert_eq!(simplify_file_name("survey.xlsx"), "survey.xlsx");
    }

    #[test]
    fn rows_to_columns() {
        let header = vec!["Q1".to_string(), "Q2".to_string()];
        let rows = vec![
            vec![Some("a".to_string()), Some("b".to_string())],
            vec![Some("c".to_string())],
            vec![None, Some(" ".to_string())],
        ];
        let r = responses_from_rows(&header, &rows);
        assert_eq!(r.questions(), &["Q1", "Q2"]);
        assert_eq!(
            r.answers(0).unwrap(),
            &[Some("a".to_string()), Some("c".to_string()), None]
        );
        assert_eq!(r.answers(1).unwrap(), &[Some("b".to_string()), None, None]);
    }
}
