//! SKU normalization policy.
//!
//! The source data never pinned down how SKUs compare, so the rules are
//! configuration. The default trims surrounding whitespace and compares
//! case-insensitively.

use serde::{Deserialize, Serialize};

/// How SKUs are normalized before uniqueness comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkuPolicy {
    /// Compare SKUs byte-for-byte instead of case-insensitively.
    pub case_sensitive: bool,
    /// Strip surrounding whitespace before comparison.
    pub trim: bool,
}

impl Default for SkuPolicy {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            trim: true,
        }
    }
}

impl SkuPolicy {
    /// Policy that compares SKUs exactly as entered.
    pub fn exact() -> Self {
        Self {
            case_sensitive: true,
            trim: false,
        }
    }

    /// Normalize a SKU for comparison under this policy.
    pub fn normalize(&self, sku: &str) -> String {
        let sku = if self.trim { sku.trim() } else { sku };
        if self.case_sensitive {
            sku.to_string()
        } else {
            sku.to_lowercase()
        }
    }

    /// Check whether two SKUs are equivalent under this policy.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        self.normalize(a) == self.normalize(b)
    }

    /// Check whether a SKU is non-empty after normalization.
    pub fn is_valid(&self, sku: &str) -> bool {
        !self.normalize(sku).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_case_insensitive_trimmed() {
        let policy = SkuPolicy::default();
        assert!(policy.matches("frz-100", " FRZ-100 "));
        assert!(policy.matches("ABC", "abc"));
    }

    #[test]
    fn test_exact_policy() {
        let policy = SkuPolicy::exact();
        assert!(!policy.matches("frz-100", "FRZ-100"));
        assert!(policy.matches("FRZ-100", "FRZ-100"));
    }

    #[test]
    fn test_blank_sku_invalid() {
        let policy = SkuPolicy::default();
        assert!(!policy.is_valid("   "));
        assert!(policy.is_valid(" FRZ-1 "));
    }
}
