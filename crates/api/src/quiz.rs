//! Turns loosely structured question lists into multiple-choice quiz polls. Wrong answers are
//! borrowed from the other questions of the same batch.

use rand::{seq::SliceRandom, Rng};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

/// One entry of a question list. Either field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionRecord {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl QuestionRecord {
    fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };
        Self { question: text_field(fields, "question"), answer: text_field(fields, "answer") }
    }
}

/// Strings are taken verbatim and numbers as their decimal text. Empty strings, zero, and anything
/// else count as missing.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(num) if num.as_f64() != Some(0.0) => Some(num.to_string()),
        _ => None,
    }
}

/// Accepted layouts of a question list, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// `[{...}, {...}]`
    List,
    /// `{"questions": [...]}`
    QuestionsField,
    /// `{"python_questions": [...]}` or any other key whose value is a list.
    FirstListField,
}

impl Shape {
    pub const ORDER: [Self; 3] = [Self::List, Self::QuestionsField, Self::FirstListField];

    pub fn matches(self, doc: &Value) -> Option<&[Value]> {
        match self {
            Self::List => doc.as_array().map(Vec::as_slice),
            Self::QuestionsField => doc.get("questions")?.as_array().map(Vec::as_slice),
            Self::FirstListField => doc.as_object()?.values().find_map(Value::as_array).map(Vec::as_slice),
        }
    }
}

/// Finds the question list in a JSON document. Returns `None` if no shape matches or the list is
/// empty.
pub fn extract(doc: &Value) -> Option<Vec<QuestionRecord>> {
    let items = Shape::ORDER.into_iter().find_map(|shape| shape.matches(doc))?;
    if items.is_empty() {
        return None;
    }
    Some(items.iter().map(QuestionRecord::from_value).collect())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizPoll {
    pub question: String,
    pub options: Vec<String>,
    /// Position of the correct answer within `options`.
    pub correct: usize,
}

fn padding(answer: &str) -> &'static str {
    match answer {
        "True" => "False",
        "False" => "True",
        "Other" => "None of the above",
        _ => "Other",
    }
}

fn build<R: Rng>(question: &str, answer: &str, pool: &[&str], rng: &mut R) -> QuizPoll {
    let mut seen = HashSet::new();
    let mut options: Vec<_> = pool.iter().copied().filter(|&other| other != answer && seen.insert(other)).collect();
    options.shuffle(rng);
    options.truncate(MAX_OPTIONS - 1);
    if options.is_empty() {
        options.push(padding(answer));
    }

    // Dropping the answer into a random slot of already shuffled options is itself a shuffle.
    let correct = rng.gen_range(0..=options.len());
    options.insert(correct, answer);
    debug_assert!((MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()));

    QuizPoll { question: question.into(), options: options.into_iter().map(String::from).collect(), correct }
}

/// Builds one quiz poll per record that has both a question and an answer, in batch order.
pub fn generate<R: Rng>(records: &[QuestionRecord], rng: &mut R) -> Vec<QuizPoll> {
    let pool: Vec<_> = records.iter().filter_map(|record| record.answer.as_deref()).collect();
    records
        .iter()
        .filter_map(|record| {
            let question = record.question.as_deref()?;
            let answer = record.answer.as_deref()?;
            Some(build(question, answer, &pool, rng))
        })
        .collect()
}
