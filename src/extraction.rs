use regex::Regex;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{classify, Classification, Filters};

lazy_static! {
    // Optional +251 / 251 / trunk 0 prefix, then a nine digit national
    // number in one of the usual groupings:
    //   91 123 4567, (011) 123 4567, 911 23 45 67, 911 234 567
    static ref CANDIDATE_PATTERN: Regex = Regex::new(
        r"(?:\+?251[ .-]?|\(?0)?(?:\d{2}\)?[ .-]?\d{3}[ .-]?\d{4}|\d{3}[ .-]?\d{2}[ .-]?\d{2}[ .-]?\d{2}|\d{3}[ .-]?\d{3}[ .-]?\d{3})"
    ).unwrap();
}

/// Finds candidate Ethiopian phone numbers in free text.
///
/// Candidates are returned as written. Digit runs that continue past the
/// candidate (longer numbers, dotted quads, timestamps) are skipped.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    let mut results = Vec::new();
    let mut pos = 0;

    while let Some(m) = CANDIDATE_PATTERN.find_at(text, pos) {
        if is_standalone(text, m.start(), m.end()) {
            results.push(m.as_str().trim().to_string());
            pos = m.end();
        } else {
            // A rejected candidate may start inside a short digit group that
            // precedes a real number, so retry from the next character.
            pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
    }

    results
}

fn is_standalone(text: &str, start: usize, end: usize) -> bool {
    let before: Vec<char> = text[..start].chars().rev().take(2).collect();
    let after: Vec<char> = text[end..].chars().take(2).collect();

    !continues_number(&before) && !continues_number(&after)
}

// `chars` are the two characters next to a candidate, nearest first.
fn continues_number(chars: &[char]) -> bool {
    match chars {
        [c, ..] if c.is_ascii_digit() || *c == '+' => true,
        ['.' | '-', d, ..] if d.is_ascii_digit() => true,
        _ => false,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub line: usize,
    pub value: String,
    pub classification: Classification,
}

/// Classification counts for every candidate found in a block of text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextReport {
    pub lines_processed: usize,
    pub candidates: usize,
    pub valid: usize,
    pub providers: BTreeMap<String, usize>,
    pub phone_types: BTreeMap<String, usize>,
    pub findings: Vec<Finding>,
}

impl TextReport {
    fn record(&mut self, line: usize, value: String, classification: Classification) {
        self.candidates += 1;
        if classification.is_valid {
            self.valid += 1;
        }
        if let Some(provider) = classification.provider {
            *self.providers.entry(provider.to_string()).or_insert(0) += 1;
        }
        if let Some(phone_type) = classification.phone_type {
            *self.phone_types.entry(phone_type.to_string()).or_insert(0) += 1;
        }
        self.findings.push(Finding { line, value, classification });
    }
}

/// Extracts and classifies every candidate number in `text`.
pub fn analyze_text(text: &str, filters: &Filters) -> TextReport {
    let mut report = TextReport::default();

    for (index, line) in text.lines().enumerate() {
        report.lines_processed += 1;
        for value in extract_phone_numbers(line) {
            let classification = classify(value.as_str(), filters);
            report.record(index + 1, value, classification);
        }
    }

    report
}
