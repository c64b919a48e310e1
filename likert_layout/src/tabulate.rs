//! Turning raw survey answers into response tables.

use log::{debug, info};
use std::collections::HashSet;
use unicode_width::UnicodeWidthStr;

use crate::config::*;
use crate::table::ResponseTable;

/// The raw answers, one column per question.
///
/// A missing answer is `None`.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Responses {
    questions: Vec<String>,
    answers: Vec<Vec<Option<String>>>,
}

impl Responses {
    pub fn new() -> Responses {
        Responses::default()
    }

    /// Adds all the answers to one question. Empty strings count as missing answers.
    pub fn add_question(&mut self, question: &str, answers: &[Option<String>]) {
        let cleaned: Vec<Option<String>> = answers
            .iter()
            .map(|a| match a {
                Some(s) if s.trim().is_empty() => None,
                x => x.clone(),
            })
            .collect();
        self.questions.push(question.to_string());
        self.answers.push(cleaned);
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self, question_idx: usize) -> Option<&[Option<String>]> {
        self.answers.get(question_idx).map(|a| a.as_slice())
    }

    pub fn num_questions(&self) -> usize {
        self.questions.len()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TabulateOptions {
    /// Question labels are wrapped to this many columns.
    pub label_max_width: usize,
    /// Leaves out the no-response category.
    pub drop_zero_category: bool,
}

impl TabulateOptions {
    pub const DEFAULT_OPTIONS: TabulateOptions = TabulateOptions {
        label_max_width: 30,
        drop_zero_category: false,
    };
}

impl Default for TabulateOptions {
    fn default() -> Self {
        TabulateOptions::DEFAULT_OPTIONS
    }
}

/// Counts the answers of each question, in the order of the scale.
///
/// Every answer is checked against the scale first; all the answers that do not belong to
/// it are reported together.
pub fn likert_counts(
    responses: &Responses,
    scale: &Scale,
    options: &TabulateOptions,
) -> Result<ResponseTable, LayoutErrors> {
    info!(
        "likert_counts: {:?} questions, scale: {:?}",
        responses.num_questions(),
        scale.categories()
    );
    let violations = validate(responses, scale);
    if !violations.is_empty() {
        return Err(LayoutErrors::ScaleMismatch(violations));
    }

    let mut table = ResponseTable::new(scale, TableKind::Counts);
    for (question, answers) in responses.questions.iter().zip(responses.answers.iter()) {
        let mut counts: Vec<f64> = vec![0.0; scale.len()];
        for a in answers.iter().flatten() {
            if let Some(idx) = scale.position(a) {
                counts[idx] += 1.0;
            }
        }
        let label = wrap_label(question, options.label_max_width);
        debug!("likert_counts: {:?}: {:?}", label, counts);
        table.add_row(&label, &counts)?;
    }

    if options.drop_zero_category {
        if !scale.has_no_response() {
            return Err(LayoutErrors::InvalidInput(format!(
                "cannot drop the no-response category: the scale does not start with {:?}",
                NO_RESPONSE
            )));
        }
        table = table.drop_category(NO_RESPONSE)?;
    }
    Ok(table)
}

/// Same as [`likert_counts`], with each question normalized to 100.
///
/// The warning is set when the questions do not all have the same number of answers.
pub fn likert_percentages(
    responses: &Responses,
    scale: &Scale,
    options: &TabulateOptions,
) -> Result<(ResponseTable, Option<LayoutWarning>), LayoutErrors> {
    let counts = likert_counts(responses, scale, options)?;
    Ok(counts.to_percentages())
}

/// Replaces the numeric codes of the answers with the labels of the scale.
///
/// `"2"` becomes the third label of the scale. Anything that is not a valid index is
/// kept as it is, and will be reported when validated against the scale.
pub fn likert_response(responses: &Responses, format_scale: &Scale) -> Responses {
    let answers: Vec<Vec<Option<String>>> = responses
        .answers
        .iter()
        .map(|column| {
            column
                .iter()
                .map(|a| {
                    a.as_ref().map(|s| match s.trim().parse::<usize>() {
                        Ok(idx) if idx < format_scale.len() => {
                            format_scale.categories()[idx].clone()
                        }
                        _ => s.clone(),
                    })
                })
                .collect()
        })
        .collect();
    Responses {
        questions: responses.questions.clone(),
        answers,
    }
}

/// All the distinct answers, in order of first appearance.
pub fn raw_scale(responses: &Responses) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for a in responses.answers.iter().flatten().flatten() {
        if seen.insert(a.as_str()) {
            res.push(a.clone());
        }
    }
    res
}

/// Wraps a label on word boundaries so that no line is wider than `width` columns.
/// Words longer than a line are split.
pub fn wrap_label(label: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in label.split_whitespace() {
        let mut word = word.to_string();
        while word.width() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let (head, tail) = split_at_width(&word, width);
            lines.push(head);
            word = tail;
        }
        if current.is_empty() {
            current = word;
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

fn split_at_width(word: &str, width: usize) -> (String, String) {
    let mut head = String::new();
    for (idx, c) in word.char_indices() {
        let mut candidate = head.clone();
        candidate.push(c);
        // Always keep at least one character per line.
        if candidate.width() > width && !head.is_empty() {
            return (head, word[idx..].to_string());
        }
        head = candidate;
    }
    (head, String::new())
}

fn validate(responses: &Responses, scale: &Scale) -> Vec<ScaleViolation> {
    let mut seen: HashSet<ScaleViolation> = HashSet::new();
    let mut violations: Vec<ScaleViolation> = Vec::new();
    for (question, answers) in responses.questions.iter().zip(responses.answers.iter()) {
        for a in answers.iter().flatten() {
            if !scale.contains(a) {
                let v = ScaleViolation::UnknownResponse {
                    question: question.clone(),
                    value: a.clone(),
                };
                if seen.insert(v.clone()) {
                    violations.push(v);
                }
            }
        }
    }
    violations
}
