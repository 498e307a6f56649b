//! Lenient field codecs for previously stored records.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Read a budget written either as a JSON number or as a numeric string.
///
/// `null` and the empty string both mean zero.
pub(crate) fn budget<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrText::Number(value)) => Ok(value),
        Some(NumberOrText::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid budget: {text:?}")))
        }
    }
}

/// Optional dates are stored as `""` when absent.
pub(crate) mod optional_date {
    use super::{de, Deserialize, Deserializer, NaiveDate, Serializer, DATE_FORMAT};

    pub(crate) fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid date: {text:?}"))),
        }
    }
}
