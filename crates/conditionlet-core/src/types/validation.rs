//! Validation outcomes

use serde::Serialize;

const DEFAULT_ERROR_MESSAGE: &str = "Invalid value";

/// Outcome of validating one configured value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    input_id: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ValidationResult {
    /// A passing result
    pub fn valid(input_id: impl Into<String>) -> Self {
        Self {
            input_id: input_id.into(),
            valid: true,
            error_message: None,
        }
    }

    /// A failing result. An empty message is replaced with a generic one.
    pub fn invalid(input_id: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            input_id: input_id.into(),
            valid: false,
            error_message: Some(message),
        }
    }

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Present iff the result is invalid
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Aggregated outcome for a set of configured values
///
/// `has_errors` is maintained by [`ValidationResults::push`] and always
/// reflects whether any contained result is invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResults {
    has_errors: bool,
    results: Vec<ValidationResult>,
}

impl ValidationResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: ValidationResult) {
        self.has_errors |= !result.is_valid();
        self.results.push(result);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// All results in the order the values were supplied
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Only the failing results
    pub fn errors(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.is_valid())
    }

    /// Error messages of the failing results, in order
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors().filter_map(|r| r.error_message()).collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl FromIterator<ValidationResult> for ValidationResults {
    fn from_iter<T: IntoIterator<Item = ValidationResult>>(iter: T) -> Self {
        let mut results = ValidationResults::new();
        for result in iter {
            results.push(result);
        }
        results
    }
}
