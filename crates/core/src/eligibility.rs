use serde::{Deserialize, Serialize};

use crate::domain::rule::{
    BundleVisibility, DiscountRule, PrimaryVisibility, ProductId,
};

/// Which precedence tier won the resolution. Specific beats except beats
/// all; candidates are scanned in the order supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    Specific,
    Except,
    All,
}

#[derive(Clone, Debug)]
pub struct Resolution<'a> {
    pub rule: &'a DiscountRule,
    pub tier: MatchTier,
}

/// Diagnostics for admin tooling. Merchant configuration is expected to
/// yield at most one applicable rule per product; `except_matches > 1`
/// means overlapping except-type rules where the last one scanned wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub specific_matches: usize,
    pub except_matches: usize,
    pub all_matches: usize,
}

impl ResolutionReport {
    pub fn is_ambiguous(&self) -> bool {
        self.except_matches > 1
    }
}

/// Picks the single rule that applies to `product_id`, or `None`.
///
/// Precedence, evaluated in candidate order:
/// 1. specific visibility listing the product: immediate winner.
/// 2. except visibility not listing the product: tentative; scanning
///    continues, and a later except match overwrites an earlier one.
/// 3. primary visibility "all" with every id set empty: fallback.
///
/// Callers pass only active rules; draft filtering is their job.
pub fn resolve<'a>(
    candidates: &'a [DiscountRule],
    product_id: &ProductId,
) -> Option<&'a DiscountRule> {
    resolve_report(candidates, product_id).0.map(|resolution| resolution.rule)
}

pub fn resolve_report<'a>(
    candidates: &'a [DiscountRule],
    product_id: &ProductId,
) -> (Option<Resolution<'a>>, ResolutionReport) {
    let mut report = ResolutionReport::default();
    let mut except_match: Option<&DiscountRule> = None;
    let mut all_match: Option<&DiscountRule> = None;

    for rule in candidates {
        if is_specific(rule) && rule.lists_product(product_id) {
            report.specific_matches += 1;
            return (Some(Resolution { rule, tier: MatchTier::Specific }), report);
        }

        if is_except(rule) && !rule.lists_product(product_id) {
            report.except_matches += 1;
            // Last except match wins when several qualify.
            except_match = Some(rule);
            continue;
        }

        if rule.visibility_primary == Some(PrimaryVisibility::All) && rule.has_empty_id_sets() {
            report.all_matches += 1;
            if all_match.is_none() {
                all_match = Some(rule);
            }
        }
    }

    let resolution = except_match
        .map(|rule| Resolution { rule, tier: MatchTier::Except })
        .or_else(|| all_match.map(|rule| Resolution { rule, tier: MatchTier::All }));
    (resolution, report)
}

fn is_specific(rule: &DiscountRule) -> bool {
    rule.visibility_primary == Some(PrimaryVisibility::Specific)
        || rule.visibility_bundle == Some(BundleVisibility::BundleSpecific)
}

fn is_except(rule: &DiscountRule) -> bool {
    rule.visibility_primary == Some(PrimaryVisibility::Except)
        || rule.visibility_bundle == Some(BundleVisibility::BundleExcept)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;

    use crate::domain::rule::{
        BundleVisibility, DiscountRule, DiscountType, PrimaryVisibility, ProductId, RuleId,
        RuleStatus,
    };
    use crate::domain::style::StyleConfig;

    use super::{resolve, resolve_report, MatchTier};

    fn rule(id: &str) -> DiscountRule {
        DiscountRule {
            id: RuleId(id.to_string()),
            discount_type: DiscountType::VolumeSameProduct,
            options: Vec::new(),
            style: StyleConfig::default(),
            visibility_primary: None,
            visibility_bundle: None,
            primary_specific_product_ids: HashSet::new(),
            primary_except_product_ids: HashSet::new(),
            bundle_specific_product_ids: HashSet::new(),
            bundle_except_product_ids: HashSet::new(),
            status: RuleStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn specific_rule(id: &str, product: &str) -> DiscountRule {
        let mut rule = rule(id);
        rule.visibility_primary = Some(PrimaryVisibility::Specific);
        rule.primary_specific_product_ids.insert(ProductId(product.to_string()));
        rule
    }

    fn except_rule(id: &str, excluded: &[&str]) -> DiscountRule {
        let mut rule = rule(id);
        rule.visibility_primary = Some(PrimaryVisibility::Except);
        for product in excluded {
            rule.primary_except_product_ids.insert(ProductId(product.to_string()));
        }
        rule
    }

    fn all_rule(id: &str) -> DiscountRule {
        let mut rule = rule(id);
        rule.visibility_primary = Some(PrimaryVisibility::All);
        rule
    }

    #[test]
    fn specific_match_wins_even_when_scanned_after_except() {
        let except = except_rule("except", &[]);
        let specific = specific_rule("specific", "p-1");
        let candidates = vec![except, specific];

        let winner = resolve(&candidates, &ProductId("p-1".to_string()))
            .expect("specific rule should match");
        assert_eq!(winner.id.0, "specific");
    }

    #[test]
    fn except_rule_matches_products_it_does_not_list() {
        let candidates = vec![except_rule("except", &["p-banned"])];

        assert!(resolve(&candidates, &ProductId("p-banned".to_string())).is_none());
        let winner = resolve(&candidates, &ProductId("p-ok".to_string()))
            .expect("unlisted product should match");
        assert_eq!(winner.id.0, "except");
    }

    #[test]
    fn bundle_specific_set_also_triggers_the_specific_tier() {
        let mut rule = rule("bundle");
        rule.visibility_bundle = Some(BundleVisibility::BundleSpecific);
        rule.bundle_specific_product_ids.insert(ProductId("p-1".to_string()));
        let candidates = vec![rule];

        let (resolution, _) = resolve_report(&candidates, &ProductId("p-1".to_string()));
        assert_eq!(resolution.expect("match").tier, MatchTier::Specific);
    }

    #[test]
    fn except_beats_all_regardless_of_order() {
        let candidates = vec![all_rule("all"), except_rule("except", &[])];

        let (resolution, _) = resolve_report(&candidates, &ProductId("p-1".to_string()));
        let resolution = resolution.expect("match");
        assert_eq!(resolution.rule.id.0, "except");
        assert_eq!(resolution.tier, MatchTier::Except);
    }

    #[test]
    fn later_except_match_overwrites_earlier_one() {
        let candidates = vec![except_rule("first", &[]), except_rule("second", &[])];

        let (resolution, report) = resolve_report(&candidates, &ProductId("p-1".to_string()));
        assert_eq!(resolution.expect("match").rule.id.0, "second");
        assert!(report.is_ambiguous());
        assert_eq!(report.except_matches, 2);
    }

    #[test]
    fn all_rule_with_populated_sets_is_not_a_fallback() {
        let mut tainted = all_rule("tainted");
        tainted.primary_except_product_ids.insert(ProductId("p-x".to_string()));
        let candidates = vec![tainted];

        assert!(resolve(&candidates, &ProductId("p-1".to_string())).is_none());
    }

    #[test]
    fn no_candidates_resolves_to_none() {
        assert!(resolve(&[], &ProductId("p-1".to_string())).is_none());
    }
}
