//! Bounded regular expression matching
//!
//! Patterns come from administrative input, so compilation is capped. The
//! `regex` engine has no backtracking and matches in time linear in the
//! input, so bounding compilation is enough to bound the whole evaluation.

use crate::error::MatchError;
use ::regex::{Regex, RegexBuilder};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Compilation limits for administrator supplied patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexLimits {
    /// Maximum pattern length in bytes
    pub max_pattern_len: usize,
    /// Maximum size of the compiled program
    pub size_limit: usize,
    /// Maximum size of the lazy DFA cache
    pub dfa_size_limit: usize,
    /// Compiled patterns kept per conditionlet; 0 disables caching
    pub cache_capacity: usize,
}

impl Default for RegexLimits {
    fn default() -> Self {
        Self {
            max_pattern_len: 1024,
            size_limit: 1 << 20,
            dfa_size_limit: 2 << 20,
            cache_capacity: 256,
        }
    }
}

impl RegexLimits {
    /// Compile a pattern within these limits
    pub fn compile(&self, pattern: &str) -> Result<Regex, MatchError> {
        if pattern.len() > self.max_pattern_len {
            return Err(MatchError::PatternTooLong {
                len: pattern.len(),
                max: self.max_pattern_len,
            });
        }

        let regex = RegexBuilder::new(pattern)
            .size_limit(self.size_limit)
            .dfa_size_limit(self.dfa_size_limit)
            .build()?;
        Ok(regex)
    }
}

/// Compiled patterns keyed by their source
///
/// Rule values rarely change, so each pattern is compiled once and reused
/// by every request. Only successful compilations are kept. When the cache
/// is full it is emptied before the next insert.
#[derive(Debug, Default)]
pub struct RegexCache {
    limits: RegexLimits,
    compiled: RwLock<HashMap<String, Regex>>,
}

impl RegexCache {
    pub fn new(limits: RegexLimits) -> Self {
        Self {
            limits,
            compiled: RwLock::new(HashMap::new()),
        }
    }

    pub fn limits(&self) -> &RegexLimits {
        &self.limits
    }

    /// Find `pattern` anywhere in `haystack`
    pub fn find(&self, pattern: &str, haystack: &str) -> Result<bool, MatchError> {
        if let Some(regex) = self.compiled.read().get(pattern) {
            return Ok(regex.is_match(haystack));
        }

        let regex = self.limits.compile(pattern)?;
        let matched = regex.is_match(haystack);

        if self.limits.cache_capacity > 0 {
            let mut compiled = self.compiled.write();
            if compiled.len() >= self.limits.cache_capacity && !compiled.contains_key(pattern) {
                compiled.clear();
            }
            compiled.insert(pattern.to_string(), regex);
        }
        Ok(matched)
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.compiled.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.read().is_empty()
    }
}
