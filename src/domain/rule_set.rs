use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Category name used by the built-in defaults.
pub const DISCOUNTS: &str = "discounts";

/// Shape errors found while validating a rule set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RulesError {
    #[error("empty category name")]
    EmptyCategory,

    #[error("empty tier key in category '{0}'")]
    EmptyTier(String),

    #[error("non-finite rate for tier '{tier}' in category '{category}'")]
    NonFiniteRate { category: String, tier: String },

    #[error("rate {rate} for tier '{tier}' in category '{category}' is outside 0.0..=1.0")]
    RateOutOfRange {
        category: String,
        tier: String,
        rate: f64,
    },
}

/// Tiers of a single category: range key to fractional discount.
///
/// Range keys such as `"0-100"` or `"470+"` are opaque here; whoever
/// prices against them decides what they mean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable(BTreeMap<String, f64>);

impl TierTable {
    pub fn new() -> Self {
        TierTable::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, range: impl Into<String>, rate: f64) -> Self {
        self.0.insert(range.into(), rate);
        self
    }

    pub fn insert(&mut self, range: impl Into<String>, rate: f64) -> Option<f64> {
        self.0.insert(range.into(), rate)
    }

    pub fn rate(&self, range: &str) -> Option<f64> {
        self.0.get(range).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for TierTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        TierTable(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Pricing rules grouped by category.
///
/// Serializes as a plain JSON object of objects, e.g.
/// `{"discounts":{"0-100":0.3}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeMap<String, TierTable>);

impl RuleSet {
    /// A rule set with no categories.
    pub fn empty() -> Self {
        RuleSet::default()
    }

    /// The rules served when no override applies.
    pub fn builtin() -> Self {
        RuleSet::empty().with_category(
            DISCOUNTS,
            TierTable::new().with("0-100", 0.3).with("101-220", 0.2),
        )
    }

    /// Builder-style category insert. Replaces any existing category of the
    /// same name.
    pub fn with_category(mut self, name: impl Into<String>, tiers: TierTable) -> Self {
        self.0.insert(name.into(), tiers);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, tiers: TierTable) -> Option<TierTable> {
        self.0.insert(name.into(), tiers)
    }

    pub fn category(&self, name: &str) -> Option<&TierTable> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TierTable)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check shape only: non-empty keys and rates within `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), RulesError> {
        for (category, tiers) in &self.0 {
            if category.trim().is_empty() {
                return Err(RulesError::EmptyCategory);
            }

            for (tier, rate) in &tiers.0 {
                if tier.trim().is_empty() {
                    return Err(RulesError::EmptyTier(category.clone()));
                }
                if !rate.is_finite() {
                    return Err(RulesError::NonFiniteRate {
                        category: category.clone(),
                        tier: tier.clone(),
                    });
                }
                if !(0.0..=1.0).contains(rate) {
                    return Err(RulesError::RateOutOfRange {
                        category: category.clone(),
                        tier: tier.clone(),
                        rate: *rate,
                    });
                }
            }
        }

        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, TierTable)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, TierTable)>>(iter: I) -> Self {
        RuleSet(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_serialization() {
        let json = serde_json::to_string(&RuleSet::builtin()).unwrap();
        assert_eq!(json, r#"{"discounts":{"0-100":0.3,"101-220":0.2}}"#);
    }

    #[test]
    fn test_deserialize_yaml() {
        let yaml = r#"
discounts:
  "1-100": 0.3
  "470+": 0.1
shipping:
  "0-50": 1.0
"#;

        let rules: RuleSet = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.category("discounts").unwrap().rate("470+"), Some(0.1));
        assert_eq!(rules.category("shipping").unwrap().rate("0-50"), Some(1.0));
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let rules = RuleSet::empty().with_category(
            "discounts",
            TierTable::new().with("free", 1.0).with("none", 0.0),
        );

        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let rules =
            RuleSet::empty().with_category("discounts", TierTable::new().with("0-100", 30.0));

        let err = rules.validate().unwrap_err();
        assert!(matches!(err, RulesError::RateOutOfRange { .. }));
        assert!(err.to_string().contains("0-100"));
    }

    #[test]
    fn test_validate_rejects_nan_and_empty_keys() {
        let nan = RuleSet::empty().with_category("discounts", TierTable::new().with("a", f64::NAN));
        assert!(matches!(
            nan.validate(),
            Err(RulesError::NonFiniteRate { .. })
        ));

        let empty_tier =
            RuleSet::empty().with_category("discounts", TierTable::new().with(" ", 0.1));
        assert_eq!(
            empty_tier.validate(),
            Err(RulesError::EmptyTier("discounts".to_string()))
        );

        let empty_category = RuleSet::empty().with_category("", TierTable::new());
        assert_eq!(empty_category.validate(), Err(RulesError::EmptyCategory));
    }
}
