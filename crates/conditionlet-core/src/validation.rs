//! Validation pipeline
//!
//! Checks configured values against a conditionlet's declared comparisons
//! and inputs before they are persisted or evaluated. Invalid configuration
//! is reported as data in [`ValidationResults`], never as an error.
//!
//! # Rules
//!
//! - The comparison id must be one the conditionlet declares
//! - Every value must name an input id
//! - The input id must be declared for the chosen comparison
//! - The value must not be blank
//! - Enumerated inputs only accept their listed values

use crate::types::{
    Comparison, ConditionValue, ConditionletInput, ConditionletInputValue, ValidationResult,
    ValidationResults,
};

/// Bind positional evaluation values onto declared inputs
///
/// Value `i` binds to input `i`; any surplus values bind to the last declared
/// input so that none escape validation. Returns an empty list when the
/// conditionlet declares no inputs.
pub fn bind_values(
    inputs: &[ConditionletInput],
    values: &[ConditionValue],
) -> Vec<ConditionletInputValue> {
    let Some(last) = inputs.last() else {
        return Vec::new();
    };

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let input = inputs.get(i).unwrap_or(last);
            ConditionletInputValue::new(input.id.clone(), value.value.clone())
        })
        .collect()
}

/// Validate a single configured value against the declared inputs
pub fn validate_input_value(
    inputs: &[ConditionletInput],
    input_value: &ConditionletInputValue,
) -> ValidationResult {
    let input_id = input_value.conditionlet_input_id.as_str();
    if input_id.trim().is_empty() {
        return ValidationResult::invalid(input_id, "Missing input id");
    }

    let Some(input) = inputs.iter().find(|i| i.id == input_id) else {
        return ValidationResult::invalid(input_id, format!("Unknown input '{}'", input_id));
    };

    let value = input_value.value.as_str();
    if value.trim().is_empty() {
        return ValidationResult::invalid(
            input_id,
            format!("Invalid value for input '{}': '{}'", input_id, value),
        );
    }

    if !input.accepts(value) {
        return ValidationResult::invalid(
            input_id,
            format!("Value '{}' is not allowed for input '{}'", value, input_id),
        );
    }

    ValidationResult::valid(input_id)
}

/// Validate a set of configured values for the chosen comparison
///
/// An undeclared comparison contributes one failing result keyed by an empty
/// input id; every supplied value then contributes one result, in order.
pub fn validate_input_values(
    comparison_id: &str,
    comparisons: &[Comparison],
    inputs: &[ConditionletInput],
    values: &[ConditionletInputValue],
) -> ValidationResults {
    validate_input_values_with(comparison_id, comparisons, inputs, values, |_| Ok(()))
}

/// Same as [`validate_input_values`], with an extra comparison-specific check
///
/// `check` only runs for values that passed the structural checks; an `Err`
/// message marks the value invalid.
pub fn validate_input_values_with<F>(
    comparison_id: &str,
    comparisons: &[Comparison],
    inputs: &[ConditionletInput],
    values: &[ConditionletInputValue],
    check: F,
) -> ValidationResults
where
    F: Fn(&ConditionletInputValue) -> Result<(), String>,
{
    let mut results = ValidationResults::new();

    if !comparisons.iter().any(|c| c.id == comparison_id) {
        results.push(ValidationResult::invalid(
            "",
            format!("Unknown comparison '{}'", comparison_id),
        ));
    }

    for value in values {
        let result = validate_input_value(inputs, value);
        if !result.is_valid() {
            results.push(result);
            continue;
        }
        match check(value) {
            Ok(()) => results.push(result),
            Err(message) => {
                results.push(ValidationResult::invalid(
                    value.conditionlet_input_id.as_str(),
                    message,
                ));
            }
        }
    }

    results
}
