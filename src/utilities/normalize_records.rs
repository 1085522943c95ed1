use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::faq_data::{FaqRecord, RawFaqRecord};

fn whitespace_run() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern"))
}

/// Trims a field and collapses every internal whitespace run to one space.
pub fn normalize_text(text: &str) -> String {
    whitespace_run().replace_all(text.trim(), " ").into_owned()
}

/// Cleans extracted records: normalizes whitespace, drops records without a
/// question or answer and keeps only the first copy of duplicates.
pub fn normalize_records<I>(raw: I) -> Vec<FaqRecord>
where
    I: IntoIterator<Item = RawFaqRecord>,
{
    let mut seen = HashSet::new();

    raw.into_iter()
        .map(|record| FaqRecord {
            category: normalize_text(&record.category),
            question: normalize_text(&record.question),
            answer: normalize_text(&record.answer),
        })
        .filter(|record| !record.question.is_empty() && !record.answer.is_empty())
        .filter(|record| seen.insert(record.clone()))
        .collect()
}
