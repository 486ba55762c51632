use super::RuleSet;

/// Overlay `overrides` onto `defaults`.
///
/// Merging is shallow: a category present in `overrides` replaces the
/// default category wholesale, tiers included. Categories only present in
/// one side are carried through unchanged. Neither input is modified.
pub fn merge(defaults: &RuleSet, overrides: &RuleSet) -> RuleSet {
    let mut effective = defaults.clone();

    for (name, tiers) in overrides.iter() {
        effective.insert(name, tiers.clone());
    }

    effective
}
