use log::{debug, warn};

use crate::config::*;

/// Answers per question and per category.
///
/// ```
/// use likert_layout::{ResponseTable, Scale, TableKind};
/// # use likert_layout::LayoutErrors;
///
/// let scale = Scale::new(&["Disagree", "Neutral", "Agree"])?;
/// let mut table = ResponseTable::new(&scale, TableKind::Counts);
/// table.add_row("I like Rust", &[1.0, 2.0, 7.0])?;
/// assert_eq!(table.row_totals(), vec![10.0]);
/// # Ok::<(), LayoutErrors>(())
/// ```
#[derive(PartialEq, Debug, Clone)]
pub struct ResponseTable {
    questions: Vec<String>,
    categories: Vec<String>,
    rows: Vec<Vec<f64>>,
    kind: TableKind,
}

impl ResponseTable {
    /// An empty table with one column per category of the scale.
    pub fn new(scale: &Scale, kind: TableKind) -> ResponseTable {
        ResponseTable::with_categories(scale.categories().to_vec(), kind)
    }

    /// An empty table with arbitrary columns. The columns are only checked against a
    /// scale when the layout is computed.
    pub fn with_categories(categories: Vec<String>, kind: TableKind) -> ResponseTable {
        ResponseTable {
            questions: Vec::new(),
            categories,
            rows: Vec::new(),
            kind,
        }
    }

    pub fn add_row(&mut self, question: &str, values: &[f64]) -> Result<(), LayoutErrors> {
        if values.len() != self.categories.len() {
            return Err(LayoutErrors::InvalidInput(format!(
                "question {:?} has {} values but the table has {} categories",
                question,
                values.len(),
                self.categories.len()
            )));
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(LayoutErrors::InvalidInput(format!(
                "question {:?}: {} is not a valid number of responses",
                question, v
            )));
        }
        self.questions.push(question.to_string());
        self.rows.push(values.to_vec());
        Ok(())
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_totals(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.iter().sum()).collect()
    }

    /// Removes one column.
    pub fn drop_category(&self, category: &str) -> Result<ResponseTable, LayoutErrors> {
        let idx = self
            .categories
            .iter()
            .position(|c| c == category)
            .ok_or_else(|| {
                LayoutErrors::ScaleMismatch(vec![ScaleViolation::MissingCategory(
                    category.to_string(),
                )])
            })?;
        let mut res = self.clone();
        res.categories.remove(idx);
        for row in res.rows.iter_mut() {
            row.remove(idx);
        }
        Ok(res)
    }

    /// Normalizes every row so that it sums to 100.
    ///
    /// Rows nobody answered stay at 0. If the rows do not all have the same total as
    /// the first one, a warning is returned (and logged) along with the table.
    pub fn to_percentages(&self) -> (ResponseTable, Option<LayoutWarning>) {
        let totals = self.row_totals();
        debug!("to_percentages: row totals: {:?}", totals);

        let warning = match totals.first() {
            Some(first) if totals.iter().any(|t| t != first) => {
                let w = LayoutWarning::Comparability {
                    totals: self
                        .questions
                        .iter()
                        .cloned()
                        .zip(totals.iter().cloned())
                        .collect(),
                };
                warn!("{}", w);
                Some(w)
            }
            _ => None,
        };

        let rows: Vec<Vec<f64>> = self
            .rows
            .iter()
            .zip(totals.iter())
            .map(|(row, total)| {
                row.iter()
                    .map(|v| if *total > 0.0 { 100.0 * v / total } else { 0.0 })
                    .collect()
            })
            .collect();

        let res = ResponseTable {
            questions: self.questions.clone(),
            categories: self.categories.clone(),
            rows,
            kind: TableKind::Percentages,
        };
        (res, warning)
    }

    /// Lists every way in which the columns differ from the scale.
    pub fn check_categories(&self, scale: &Scale) -> Vec<ScaleViolation> {
        let mut violations: Vec<ScaleViolation> = Vec::new();
        for c in scale.categories() {
            if !self.categories.contains(c) {
                violations.push(ScaleViolation::MissingCategory(c.clone()));
            }
        }
        for (idx, c) in self.categories.iter().enumerate() {
            if !scale.contains(c) {
                violations.push(ScaleViolation::UnexpectedCategory(c.clone()));
            } else if self.categories[..idx].contains(c) {
                violations.push(ScaleViolation::DuplicateCategory(c.clone()));
            }
        }
        // Only report the order when the two sets agree, it would be noise otherwise.
        if violations.is_empty() {
            for (position, (expected, found)) in
                scale.categories().iter().zip(self.categories.iter()).enumerate()
            {
                if expected != found {
                    violations.push(ScaleViolation::OutOfOrder {
                        position,
                        expected: expected.clone(),
                        found: found.clone(),
                    });
                }
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn scale3() -> Scale {
        Scale::new(&["Disagree", "Neutral", "Agree"]).unwrap()
    }

    #[test]
    fn rejects_bad_rows() {
        let mut t = ResponseTable::new(&scale3(), TableKind::Counts);
        assert!(t.add_row("q", &[1.0, 2.0]).is_err());
        assert!(t.add_row("q", &[1.0, -2.0, 3.0]).is_err());
        assert!(t.add_row("q", &[1.0, f64::NAN, 3.0]).is_err());
        assert!(t.is_empty());
    }

    #[test]
    fn percentages_sum_to_100() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut t = ResponseTable::new(&scale3(), TableKind::Counts);
        t.add_row("a", &[1.0, 1.0, 1.0]).unwrap();
        t.add_row("b", &[3.0, 0.0, 4.0]).unwrap();
        t.add_row("nobody", &[0.0, 0.0, 0.0]).unwrap();
        let (p, w) = t.to_percentages();
        assert_eq!(p.kind(), TableKind::Percentages);
        let totals = p.row_totals();
        assert_approx_eq!(f64, totals[0], 100.0, epsilon = 1e-9);
        assert_approx_eq!(f64, totals[1], 100.0, epsilon = 1e-9);
        assert_eq!(totals[2], 0.0);
        assert!(matches!(w, Some(LayoutWarning::Comparability { .. })));
        // The input is left alone.
        assert_eq!(t.kind(), TableKind::Counts);
        assert_eq!(t.rows()[1], vec![3.0, 0.0, 4.0]);
    }

    #[test]
    fn equal_totals_do_not_warn() {
        let mut t = ResponseTable::new(&scale3(), TableKind::Counts);
        t.add_row("a", &[2.0, 1.0, 1.0]).unwrap();
        t.add_row("b", &[0.0, 0.0, 4.0]).unwrap();
        let (p, w) = t.to_percentages();
        assert_eq!(w, None);
        assert_eq!(p.rows()[1], vec![0.0, 0.0, 100.0]);
    }

    #[test]
    fn category_checks() {
        let t = ResponseTable::with_categories(
            vec!["Disagree".to_string(), "Maybe".to_string()],
            TableKind::Counts,
        );
        let v = t.check_categories(&scale3());
        assert_eq!(
            v,
            vec![
                ScaleViolation::MissingCategory("Neutral".to_string()),
                ScaleViolation::MissingCategory("Agree".to_string()),
                ScaleViolation::UnexpectedCategory("Maybe".to_string()),
            ]
        );

        let t2 = ResponseTable::with_categories(
            vec![
                "Agree".to_string(),
                "Neutral".to_string(),
                "Disagree".to_string(),
            ],
            TableKind::Counts,
        );
        let v2 = t2.check_categories(&scale3());
        assert_eq!(v2.len(), 2);
        assert!(matches!(v2[0], ScaleViolation::OutOfOrder { position: 0, .. }));

        let t3 = ResponseTable::new(&scale3(), TableKind::Counts);
        assert!(t3.check_categories(&scale3()).is_empty());
    }

    #[test]
    fn repeated_columns_are_rejected() {
        let scale = Scale::new(&["Disagree", "Agree"]).unwrap();
        let t = ResponseTable::with_categories(
            vec![
                "Disagree".to_string(),
                "Agree".to_string(),
                "Agree".to_string(),
            ],
            TableKind::Counts,
        );
        assert_eq!(
            t.check_categories(&scale),
            vec![ScaleViolation::DuplicateCategory("Agree".to_string())]
        );
    }

    #[test]
    fn drop_category_removes_column() {
        let s = Scale::new(&["0", "1", "2"]).unwrap();
        let mut t = ResponseTable::new(&s, TableKind::Counts);
        t.add_row("q", &[4.0, 1.0, 2.0]).unwrap();
        let d = t.drop_category("0").unwrap();
        assert_eq!(d.categories(), &["1", "2"]);
        assert_eq!(d.rows()[0], vec![1.0, 2.0]);
        assert!(t.drop_category("7").is_err());
    }
}
