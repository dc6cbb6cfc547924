//! Value objects exchanged between conditionlets and their callers

pub mod comparison;
pub mod input;
pub mod validation;

pub use comparison::Comparison;
pub use input::{ConditionValue, ConditionletInput, ConditionletInputValue};
pub use validation::{ValidationResult, ValidationResults};
