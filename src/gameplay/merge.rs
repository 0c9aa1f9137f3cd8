//! Merge rules: how two tile values combine into one.
//!
//! The rule set is closed, so rules are a plain enum dispatched by pattern
//! match rather than a runtime strategy registry.

use serde::{Deserialize, Serialize};

/// How two tile values combine during a merge.
///
/// # Examples
///
/// ```
/// use tilefuse::MergeRule;
///
/// assert_eq!(MergeRule::Addition.apply(3, 4), 7);
/// assert_eq!(MergeRule::AbsoluteDifference.apply(3, 9), 6);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergeRule {
    /// `a + b`
    #[default]
    Addition,
    /// `|a - b|`
    AbsoluteDifference,
}

impl MergeRule {
    /// Combines two tile values under this rule.
    pub fn apply(self, a: u64, b: u64) -> u64 {
        match self {
            MergeRule::Addition => a + b,
            MergeRule::AbsoluteDifference => a.abs_diff(b),
        }
    }

    /// All selectable rules.
    pub fn all() -> [MergeRule; 2] {
        [MergeRule::Addition, MergeRule::AbsoluteDifference]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition() {
        assert_eq!(MergeRule::Addition.apply(0, 0), 0);
        assert_eq!(MergeRule::Addition.apply(12, 30), 42);
    }

    #[test]
    fn test_absolute_difference_is_symmetric() {
        assert_eq!(MergeRule::AbsoluteDifference.apply(9, 3), 6);
        assert_eq!(MergeRule::AbsoluteDifference.apply(3, 9), 6);
        assert_eq!(MergeRule::AbsoluteDifference.apply(5, 5), 0);
    }

    #[test]
    fn test_default_rule_is_addition() {
        assert_eq!(MergeRule::default(), MergeRule::Addition);
    }
}
