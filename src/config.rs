//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Deepest parenthesis nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Deepest derivation tree accepted by default, counting the root and leaves.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 1024;

/// Tunables for a validation run.
///
/// Numeric literals have no length cap: their text is kept verbatim and never
/// converted. Parenthesis nesting bounds the parser's recursion; tree depth
/// bounds the recursion of everything that walks the finished tree, since an
/// operator chain nests one level per operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Maximum number of simultaneously open parentheses.
    pub max_depth: usize,
    /// Maximum depth of the derivation tree.
    pub max_tree_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
        }
    }
}

impl ValidatorConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_tree_depth(mut self, max_tree_depth: usize) -> Self {
        self.max_tree_depth = max_tree_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ValidatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn max_depth_can_be_overridden() {
        let config: ValidatorConfig = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(config, ValidatorConfig::default().with_max_depth(4));
        assert_eq!(config.max_tree_depth, DEFAULT_MAX_TREE_DEPTH);
    }
}
