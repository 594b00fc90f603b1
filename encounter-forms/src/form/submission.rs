//! Submitted request parameters and field-scoped validation errors

use std::collections::HashMap;

/// Read access to submitted request parameters
pub trait Parameters {
    fn parameter(&self, name: &str) -> Option<&str>;
}

impl Parameters for HashMap<String, String> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// A submitted form, as decoded name/value pairs
///
/// When a name repeats, the first value wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    params: HashMap<String, String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.entry(name.into()).or_insert_with(|| value.into());
        self
    }

    /// Decode an `application/x-www-form-urlencoded` body or query string
    pub fn from_query(query: &str) -> Result<Self, std::string::FromUtf8Error> {
        let mut submission = Submission::new();
        let query = query.trim_start_matches('?');

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_name, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let name = decode_component(raw_name)?;
            let value = decode_component(raw_value)?;
            submission.params.entry(name).or_insert(value);
        }

        Ok(submission)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn decode_component(raw: &str) -> Result<String, std::string::FromUtf8Error> {
    // form encoding uses '+' for spaces
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map(|s| s.into_owned())
}

impl Parameters for Submission {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// A validation failure bound to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name of the error widget the message is shown in
    pub field: String,
    /// Translated, user-facing message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_decodes_pairs() {
        let submission = Submission::from_query("?w1=2024-01-05&w3=14%3A30&w5=&note=a+b").unwrap();

        assert_eq!(submission.parameter("w1"), Some("2024-01-05"));
        assert_eq!(submission.parameter("w3"), Some("14:30"));
        assert_eq!(submission.parameter("w5"), Some(""));
        assert_eq!(submission.parameter("note"), Some("a b"));
        assert_eq!(submission.parameter("w7"), None);
    }

    #[test]
    fn test_first_value_wins() {
        let submission = Submission::from_query("w1=a&w1=b").unwrap();
        assert_eq!(submission.parameter("w1"), Some("a"));

        let built = Submission::new().with("w1", "a").with("w1", "b");
        assert_eq!(built.parameter("w1"), Some("a"));
    }

    #[test]
    fn test_name_without_value() {
        let submission = Submission::from_query("flag&w1=x").unwrap();
        assert_eq!(submission.parameter("flag"), Some(""));
        assert_eq!(submission.len(), 2);
    }

    #[test]
    fn test_hashmap_parameters() {
        let mut map = HashMap::new();
        map.insert("w1".to_string(), "x".to_string());
        assert_eq!(Parameters::parameter(&map, "w1"), Some("x"));
    }
}
