//! Recipe loader. A recipe is a JSON file naming the memorable inputs and the
//! output knobs for one derivation; every key is optional.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::generator::{Options, DEFAULT_LENGTH, MAX_LENGTH};
use crate::input::InputSet;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("recipe file unreadable: {0}")]
    Io(String),
    #[error("recipe parse failed: {0}")]
    Parse(String),
    #[error("invalid date {0:?}; expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
    #[error("invalid length {0}; expected an integer from 1 to 4096")]
    InvalidLength(i64),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRecipe {
    #[serde(default)]
    pub strings: Vec<String>,
    #[serde(default)]
    pub numbers: Vec<i64>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(rename = "allowSpecialChars")]
    pub allow_special_chars: Option<bool>,
    pub length: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub input: InputSet,
    pub options: Options,
}

impl Recipe {
    /// Reads and validates a recipe file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw_json = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
        Self::from_json(&raw_json)
    }

    pub fn from_json(raw_json: &str) -> Result<Self, ConfigError> {
        let raw: RawRecipe =
            serde_json::from_str(raw_json).map_err(|e| ConfigError::Parse(format!("{e}")))?;
        Self::try_from(raw)
    }

    pub fn into_parts(self) -> (InputSet, Options) {
        (self.input, self.options)
    }
}

impl TryFrom<RawRecipe> for Recipe {
    type Error = ConfigError;

    fn try_from(raw: RawRecipe) -> Result<Self, Self::Error> {
        let dates = raw
            .dates
            .iter()
            .map(|text| parse_date(text))
            .collect::<Result<Vec<_>, _>>()?;

        let length = match raw.length {
            None => DEFAULT_LENGTH,
            Some(length) => usize::try_from(length)
                .ok()
                .filter(|l| (1..=MAX_LENGTH).contains(l))
                .ok_or(ConfigError::InvalidLength(length))?,
        };

        Ok(Self {
            input: InputSet::new(raw.strings, raw.numbers, dates),
            options: Options::new(raw.allow_special_chars.unwrap_or(true), length),
        })
    }
}

/// Parses a calendar day. Timestamps are moved to UTC and truncated to the
/// day they fall on.
pub fn parse_date(text: &str) -> Result<Date, ConfigError> {
    let text = text.trim();
    if let Ok(date) = Date::parse(text, format_description!("[year]-[month]-[day]")) {
        return Ok(date);
    }
    OffsetDateTime::parse(text, &Rfc3339)
        .map(|timestamp| timestamp.to_offset(UtcOffset::UTC).date())
        .map_err(|_| ConfigError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_date, ConfigError, Recipe};
    use crate::generator::{derive, DeriveError, Options, DEFAULT_LENGTH, MAX_LENGTH};
    use crate::input::InputSet;
    use serde_json::json;
    use std::fs;
    use tempfile::NamedTempFile;
    use time::macros::date;

    #[test]
    fn loads_recipe_file() {
        let payload = json!({
            "strings": ["1", "2", "3"],
            "dates": ["2025-02-28"],
            "allowSpecialChars": true,
            "length": 58
        });

        let file = NamedTempFile::new().expect("temp file");
        fs::write(file.path(), serde_json::to_vec(&payload).unwrap()).unwrap();

        let (input, options) = Recipe::load(file.path()).expect("recipe should load").into_parts();
        assert_eq!(input.dates(), &[date!(2025 - 02 - 28)]);
        assert_eq!(options, Options::new(true, 58));
        assert_eq!(
            derive(&input, &options).unwrap().as_str(),
            "K}448!S6z~~PE66!AY7))6ZiW&855c:jzzm-{W4y->0AH}T[00&=c9B?7~"
        );
    }

    #[test]
    fn empty_recipe_uses_defaults() {
        let recipe = Recipe::from_json("{}").unwrap();
        assert_eq!(recipe.input, InputSet::default());
        assert_eq!(recipe.options, Options::new(true, DEFAULT_LENGTH));
    }

    #[test]
    fn timestamps_truncate_to_utc_day() {
        assert_eq!(parse_date("2025-02-28").unwrap(), date!(2025 - 02 - 28));
        assert_eq!(
            parse_date("2025-02-28T23:30:00-02:00").unwrap(),
            date!(2025 - 03 - 01)
        );
        assert_eq!(
            parse_date(" 2025-02-28T00:00:00.000Z ").unwrap(),
            date!(2025 - 02 - 28)
        );
    }

    #[test]
    fn rejects_bad_dates() {
        let err = parse_date("28/02/2025").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate(_)));
    }

    #[test]
    fn rejects_out_of_range_length() {
        for length in [0, -5, 4097, i64::MAX] {
            let err = Recipe::from_json(&json!({ "length": length }).to_string()).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidLength(l) if l == length));
        }
    }

    #[test]
    fn huge_recipe_length_fails_cleanly() {
        let err = Recipe::from_json(r#"{"length": 9223372036854775807}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLength(i64::MAX)));

        let recipe = Recipe::from_json(&json!({ "length": MAX_LENGTH }).to_string()).unwrap();
        assert_eq!(recipe.options.length, MAX_LENGTH);

        // Options built in code skip the loader and hit the same bound in derive.
        let (input, mut options) = recipe.into_parts();
        options.length = MAX_LENGTH + 1;
        assert!(matches!(derive(&input, &options), Err(DeriveError::InvalidLength(_))));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Recipe::from_json(r#"{"lenght": 12}"#).unwrap_err();
        assert!(format!("{err}").contains("recipe parse failed"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Recipe::load("/nonexistent/recipe.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
