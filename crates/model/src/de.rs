//! Deserialization helpers for loosely-typed remote payloads.
//!
//! The tournament service is inconsistent: IDs and counts sometimes arrive as
//! strings, and "no value" is as likely to be `""` as `null`. These helpers
//! normalize that once, at the edge, so the rest of the model can rely on
//! plain `Option`s.

use serde::Deserialize;
use serde::de::{self, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

fn number_from(value: NumberOrString) -> Result<Option<u64>, String> {
    match value {
        NumberOrString::Number(n) => Ok(Some(n)),
        NumberOrString::String(s) if s.trim().is_empty() => Ok(None),
        NumberOrString::String(s) => s.trim().parse::<u64>().map(Some).map_err(|_| s),
    }
}

/// A required unsigned integer, accepting either `12` or `"12"`.
pub(crate) fn u64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = NumberOrString::deserialize(deserializer)?;
    match number_from(value) {
        Ok(Some(n)) => Ok(n),
        Ok(None) => Err(de::Error::custom("expected an integer, found an empty string")),
        Err(s) => Err(de::Error::custom(format!("expected an integer, found {s:?}"))),
    }
}

/// An optional unsigned integer, accepting `null`, `""`, `12` or `"12"`.
pub(crate) fn opt_u64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => number_from(value).map_err(|s| de::Error::custom(format!("expected an integer, found {s:?}"))),
    }
}

/// Same as [`opt_u64_lenient`], narrowed to `u32`.
pub(crate) fn opt_u32_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    opt_u64_lenient(deserializer)?
        .map(|n| u32::try_from(n).map_err(|_| de::Error::custom(format!("integer {n} out of range"))))
        .transpose()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrNumber {
    Bool(bool),
    Number(u64),
}

/// An optional flag, accepting `null`, `true`/`false` or `1`/`0`.
pub(crate) fn opt_bool_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(Option::<BoolOrNumber>::deserialize(deserializer)?.map(|value| match value {
        BoolOrNumber::Bool(b) => b,
        BoolOrNumber::Number(n) => n != 0,
    }))
}

/// An optional string where empty (or whitespace-only) means absent.
pub(crate) fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_u64_lenient")]
        number: Option<u64>,
        #[serde(default, deserialize_with = "non_empty")]
        text: Option<String>,
        #[serde(default, deserialize_with = "opt_bool_lenient")]
        flag: Option<bool>,
    }

    #[rstest]
    #[case(r#"{"number": 12}"#, Some(12))]
    #[case(r#"{"number": "12"}"#, Some(12))]
    #[case(r#"{"number": ""}"#, None)]
    #[case(r#"{"number": null}"#, None)]
    #[case(r#"{}"#, None)]
    fn test_optional_number(#[case] json: &str, #[case] expected: Option<u64>) {
        let probe: Probe = serde_json::from_str(json).unwrap();
        assert_eq!(probe.number, expected);
    }

    #[test]
    fn test_optional_number_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"number": "twelve"}"#).is_err());
    }

    #[rstest]
    #[case(r#"{"text": "hello"}"#, Some("hello"))]
    #[case(r#"{"text": ""}"#, None)]
    #[case(r#"{"text": "   "}"#, None)]
    #[case(r#"{"text": null}"#, None)]
    fn test_non_empty(#[case] json: &str, #[case] expected: Option<&str>) {
        let probe: Probe = serde_json::from_str(json).unwrap();
        assert_eq!(probe.text.as_deref(), expected);
    }

    #[rstest]
    #[case(r#"{"flag": true}"#, Some(true))]
    #[case(r#"{"flag": 0}"#, Some(false))]
    #[case(r#"{"flag": 1}"#, Some(true))]
    #[case(r#"{"flag": null}"#, None)]
    fn test_optional_flag(#[case] json: &str, #[case] expected: Option<bool>) {
        let probe: Probe = serde_json::from_str(json).unwrap();
        assert_eq!(probe.flag, expected);
    }
}
