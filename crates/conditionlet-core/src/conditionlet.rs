//! The conditionlet contract
//!
//! A conditionlet is one kind of rule condition (client IP, request header,
//! ...). It declares the comparisons it supports and the inputs an
//! administrator fills in, validates configured values, and evaluates itself
//! against a request.
//!
//! Implementations are shared by every request-serving thread. They must be
//! stateless across evaluations: the comparison and input sets are built at
//! construction and only read afterwards.
//!
//! # Example
//!
//! ```rust
//! use conditionlet_core::{
//!     Comparison, ConditionValue, Conditionlet, ConditionletInput, Operator, RequestContext,
//! };
//!
//! struct AlwaysHeader {
//!     comparisons: Vec<Comparison>,
//!     inputs: Vec<ConditionletInput>,
//! }
//!
//! impl Conditionlet for AlwaysHeader {
//!     fn id(&self) -> &str { "HasHeader" }
//!     fn name(&self) -> &str { "Has Header" }
//!     fn comparisons(&self) -> &[Comparison] { &self.comparisons }
//!     fn inputs(&self, _comparison_id: &str) -> &[ConditionletInput] { &self.inputs }
//!     fn evaluate(&self, ctx: &dyn RequestContext, comparison_id: &str, values: &[ConditionValue]) -> bool {
//!         comparison_id == "exists"
//!             && values.first().is_some_and(|v| ctx.header(&v.value).is_some())
//!     }
//! }
//!
//! let conditionlet = AlwaysHeader {
//!     comparisons: vec![Operator::Exists.into()],
//!     inputs: vec![ConditionletInput::text("header-key")],
//! };
//! assert_eq!(conditionlet.comparisons()[0].id, "exists");
//! ```

use crate::context::RequestContext;
use crate::types::{
    Comparison, ConditionValue, ConditionletInput, ConditionletInputValue, ValidationResults,
};
use crate::validation;

/// A pluggable rule-condition type
pub trait Conditionlet: Send + Sync {
    /// Stable identifier used as the registry key
    fn id(&self) -> &str;

    /// Human readable name
    fn name(&self) -> &str;

    /// Supported comparisons, in a fixed order
    fn comparisons(&self) -> &[Comparison];

    /// Input schema for the given comparison
    fn inputs(&self, comparison_id: &str) -> &[ConditionletInput];

    /// Find a declared comparison by its stable id
    fn comparison(&self, comparison_id: &str) -> Option<&Comparison> {
        self.comparisons().iter().find(|c| c.id == comparison_id)
    }

    /// Validate configured values for a comparison
    ///
    /// Invalid configuration is a normal result, not an error.
    fn validate(&self, comparison_id: &str, values: &[ConditionletInputValue]) -> ValidationResults {
        validation::validate_input_values(
            comparison_id,
            self.comparisons(),
            self.inputs(comparison_id),
            values,
        )
    }

    /// Decide whether the request matches
    ///
    /// Must be total: any missing context, blank comparison, empty value list
    /// or malformed configuration yields `false`.
    fn evaluate(&self, ctx: &dyn RequestContext, comparison_id: &str, values: &[ConditionValue]) -> bool;
}
