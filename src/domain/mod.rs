pub mod merge;
pub mod rule_set;

pub use merge::merge;
pub use rule_set::{RuleSet, RulesError, TierTable, DISCOUNTS};
