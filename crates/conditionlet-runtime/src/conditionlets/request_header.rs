//! Request header conditionlet

use super::ConditionletSettings;
use crate::matcher::{self, RegexCache};
use conditionlet_core::validation::{bind_values, validate_input_values_with};
use conditionlet_core::{
    Comparison, ConditionValue, Conditionlet, ConditionletInput, ConditionletInputValue, Operator,
    RequestContext, ValidationResult, ValidationResults,
};
use tracing::debug;

/// Registry id
pub const REQUEST_HEADER_ID: &str = "RequestHeader";

const NAME: &str = "Request Header Value";
const KEY_INPUT_ID: &str = "header-key";
const VALUE_INPUT_ID: &str = "header-value";

const COMPARISONS: [Operator; 7] = [
    Operator::Is,
    Operator::IsNot,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Contains,
    Operator::Regex,
    Operator::Exists,
];

/// Matches the value of a named request header
///
/// Values are positional: the first names the header, the second is the
/// comparand. `exists` only takes the header name. A missing header never
/// matches, not even for `isNot`.
pub struct RequestHeaderConditionlet {
    comparisons: Vec<Comparison>,
    inputs: Vec<ConditionletInput>,
    patterns: RegexCache,
    settings: ConditionletSettings,
}

impl RequestHeaderConditionlet {
    pub fn new(settings: ConditionletSettings) -> Self {
        Self {
            comparisons: COMPARISONS.iter().copied().map(Comparison::from).collect(),
            inputs: vec![
                ConditionletInput::text(KEY_INPUT_ID),
                ConditionletInput::text(VALUE_INPUT_ID),
            ],
            patterns: RegexCache::new(settings.regex),
            settings,
        }
    }

    fn operator(comparison_id: &str) -> Option<Operator> {
        Operator::from_id(comparison_id).filter(|op| COMPARISONS.contains(op))
    }

    fn check_comparand(&self, op: Option<Operator>, value: &ConditionletInputValue) -> Result<(), String> {
        if op == Some(Operator::Regex) && value.conditionlet_input_id == VALUE_INPUT_ID {
            self.settings
                .regex
                .compile(&value.value)
                .map(|_| ())
                .map_err(|e| e.to_string())
        } else {
            Ok(())
        }
    }

    /// Every declared input for the comparison must be supplied
    fn missing_inputs(&self, comparison_id: &str, values: &[ConditionletInputValue]) -> Vec<ValidationResult> {
        self.inputs(comparison_id)
            .iter()
            .filter(|input| !values.iter().any(|v| v.conditionlet_input_id == input.id))
            .map(|input| {
                ValidationResult::invalid(
                    input.id.as_str(),
                    format!("Missing value for input '{}'", input.id),
                )
            })
            .collect()
    }

    fn checked(&self, comparison_id: &str, values: &[ConditionletInputValue], with_comparand: bool) -> ValidationResults {
        let op = Self::operator(comparison_id);
        let mut results = validate_input_values_with(
            comparison_id,
            &self.comparisons,
            self.inputs(comparison_id),
            values,
            |value| {
                if with_comparand {
                    self.check_comparand(op, value)
                } else {
                    Ok(())
                }
            },
        );
        for missing in self.missing_inputs(comparison_id, values) {
            results.push(missing);
        }
        results
    }
}

impl Default for RequestHeaderConditionlet {
    fn default() -> Self {
        Self::new(ConditionletSettings::default())
    }
}

impl Conditionlet for RequestHeaderConditionlet {
    fn id(&self) -> &str {
        REQUEST_HEADER_ID
    }

    fn name(&self) -> &str {
        NAME
    }

    fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    fn inputs(&self, comparison_id: &str) -> &[ConditionletInput] {
        if comparison_id == Operator::Exists.id() {
            &self.inputs[..1]
        } else {
            &self.inputs
        }
    }

    fn validate(&self, comparison_id: &str, values: &[ConditionletInputValue]) -> ValidationResults {
        self.checked(comparison_id, values, true)
    }

    fn evaluate(&self, ctx: &dyn RequestContext, comparison_id: &str, values: &[ConditionValue]) -> bool {
        if values.is_empty() || comparison_id.trim().is_empty() {
            return false;
        }
        let Some(op) = Self::operator(comparison_id) else {
            debug!(comparison = comparison_id, "Unknown comparison for {}", REQUEST_HEADER_ID);
            return false;
        };

        let bound = bind_values(self.inputs(comparison_id), values);
        if self.checked(comparison_id, &bound, false).has_errors() {
            debug!(comparison = comparison_id, "Configuration failed validation, not matching");
            return false;
        }

        let name = values[0].value.trim();
        let header = ctx.header(name);
        if op == Operator::Exists {
            return header.is_some();
        }

        let (Some(actual), Some(expected)) = (header, values.get(1)) else {
            return false;
        };
        let expected = expected.value.as_str();

        let matched = match matcher::matches_text(op, actual, expected) {
            Some(result) => result,
            None => self.patterns.find(expected, actual).unwrap_or_else(|e| {
                self.settings.diagnostics.report(
                    REQUEST_HEADER_ID,
                    &format!("Cannot apply '{}' comparison to header '{}'", op, name),
                    Some(&e),
                );
                false
            }),
        };
        debug!(comparison = comparison_id, header = name, matched, "Evaluated {}", REQUEST_HEADER_ID);
        matched
    }
}
