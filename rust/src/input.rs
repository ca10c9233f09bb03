//! Memorable inputs and their canonical text forms. Order inside each list is
//! significant: the canonical text is a plain concatenation with no
//! separators or escaping.

use time::Date;

const MILLIS_PER_SECOND: i64 = 1_000;

/// How a date is rendered when it joins the canonical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateText {
    /// Milliseconds since the Unix epoch at UTC midnight, as decimal text.
    Millis,
    /// ISO-8601 timestamp at UTC midnight, e.g. `2025-02-28T00:00:00.000Z`.
    Iso,
}

/// The caller's memorable facts: free-text phrases, integers, and calendar
/// days. Read-only to the derivation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSet {
    strings: Vec<String>,
    numbers: Vec<i64>,
    dates: Vec<Date>,
}

impl InputSet {
    pub fn new(strings: Vec<String>, numbers: Vec<i64>, dates: Vec<Date>) -> Self {
        Self {
            strings,
            numbers,
            dates,
        }
    }

    pub fn with_string(mut self, value: impl Into<String>) -> Self {
        self.strings.push(value.into());
        self
    }

    pub fn with_number(mut self, value: i64) -> Self {
        self.numbers.push(value);
        self
    }

    pub fn with_date(mut self, value: Date) -> Self {
        self.dates.push(value);
        self
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    pub fn numbers(&self) -> &[i64] {
        &self.numbers
    }

    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// All phrases concatenated in order.
    pub fn joined_strings(&self) -> String {
        self.strings.concat()
    }

    /// All integers as decimal text, concatenated in order.
    pub fn joined_numbers(&self) -> String {
        self.numbers.iter().map(|n| n.to_string()).collect()
    }

    /// All dates in the requested text form, concatenated in order.
    pub fn joined_dates(&self, form: DateText) -> String {
        self.dates
            .iter()
            .map(|date| match form {
                DateText::Millis => epoch_millis(*date).to_string(),
                DateText::Iso => iso_text(*date),
            })
            .collect()
    }

    /// Canonical serialization: strings, then numbers, then dates.
    pub fn canonical(&self, form: DateText) -> String {
        let mut text = self.joined_strings();
        text.push_str(&self.joined_numbers());
        text.push_str(&self.joined_dates(form));
        text
    }
}

impl From<Vec<String>> for InputSet {
    fn from(strings: Vec<String>) -> Self {
        Self::new(strings, Vec::new(), Vec::new())
    }
}

/// Milliseconds since the Unix epoch for UTC midnight of `date`.
pub fn epoch_millis(date: Date) -> i64 {
    date.midnight().assume_utc().unix_timestamp() * MILLIS_PER_SECOND
}

/// ISO-8601 text for UTC midnight of `date`. Years outside 0..=9999 use the
/// signed six digit form (`+010000`, `-000001`).
pub fn iso_text(date: Date) -> String {
    let year = date.year();
    let year = if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else if year < 0 {
        format!("-{:06}", -year)
    } else {
        format!("+{year:06}")
    };
    format!(
        "{year}-{:02}-{:02}T00:00:00.000Z",
        u8::from(date.month()),
        date.day()
    )
}
