//! End-to-end scenarios through resolver, calculator, catalog and engine.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;

use bundly_core::{
    format_money, format_percent, BlockCatalog, BlockRenderer, DiscountMode, DiscountOption,
    DiscountRule, DiscountType, OptionCopy, PrimaryVisibility, ProductId, RuleId, RuleStatus,
    StorefrontBlockRenderer, StyleConfig,
};

fn base_rule(id: &str, discount_type: DiscountType) -> DiscountRule {
    DiscountRule {
        id: RuleId(id.to_string()),
        discount_type,
        options: Vec::new(),
        style: StyleConfig::default(),
        visibility_primary: Some(PrimaryVisibility::All),
        visibility_bundle: None,
        primary_specific_product_ids: HashSet::new(),
        primary_except_product_ids: HashSet::new(),
        bundle_specific_product_ids: HashSet::new(),
        bundle_except_product_ids: HashSet::new(),
        status: RuleStatus::Active,
        created_at: Utc::now(),
    }
}

fn titled(title: &str) -> OptionCopy {
    OptionCopy { title: title.to_string(), ..OptionCopy::default() }
}

fn tier(quantity: u32, mode: DiscountMode, value: i64, title: &str) -> DiscountOption {
    DiscountOption::Tiered {
        quantity,
        discount_mode: mode,
        discount_value: Decimal::from(value),
        copy: titled(title),
        selected_by_default: false,
    }
}

fn renderer_with(template: &str) -> StorefrontBlockRenderer {
    let mut catalog = BlockCatalog::empty();
    catalog.insert("volume-classic", template);
    catalog.insert("bogo-classic", template);
    StorefrontBlockRenderer::new(catalog, "$")
}

#[test]
fn volume_percentage_scenario_prices_exactly() {
    let renderer = renderer_with("{{#each_discount_option}}x{{/each_discount_option}}");
    let mut rule = base_rule("r-volume", DiscountType::VolumeSameProduct);
    rule.options = vec![tier(3, DiscountMode::Percentage, 20, "Three")];

    let block =
        renderer.render_block(&[rule], &ProductId("p-1".to_string()), Decimal::TEN);
    let breakdown = &block.breakdowns[0];
    assert_eq!(format_money(breakdown.base_total), "30.00");
    assert_eq!(format_money(breakdown.discount_amount), "6.00");
    assert_eq!(format_money(breakdown.customer_pays), "24.00");
}

#[test]
fn volume_fixed_scenario_prices_exactly() {
    let renderer = renderer_with("{{#each_discount_option}}x{{/each_discount_option}}");
    let mut rule = base_rule("r-fixed", DiscountType::VolumeSameProduct);
    rule.options = vec![tier(2, DiscountMode::Fixed, 5, "Two")];

    let block =
        renderer.render_block(&[rule], &ProductId("p-1".to_string()), Decimal::TEN);
    let breakdown = &block.breakdowns[0];
    assert_eq!(format_money(breakdown.base_total), "20.00");
    assert_eq!(format_money(breakdown.customer_pays), "15.00");
}

#[test]
fn bogo_scenario_prices_exactly() {
    let renderer = renderer_with("{{#each_discount_option}}x{{/each_discount_option}}");
    let mut rule = base_rule("r-bogo", DiscountType::Bogo);
    rule.options = vec![DiscountOption::BuyXGetY {
        buy_quantity: 2,
        free_quantity: 3,
        copy: titled("Buy 2 get 3"),
        selected_by_default: false,
    }];

    let block =
        renderer.render_block(&[rule], &ProductId("p-1".to_string()), Decimal::TEN);
    let breakdown = &block.breakdowns[0];
    assert_eq!(format_money(breakdown.base_total), "50.00");
    assert_eq!(format_money(breakdown.customer_pays), "20.00");
    assert_eq!(format_percent(breakdown.effective_percentage), "60");
}

#[test]
fn template_expansion_scenario_matches_expected_html() {
    let renderer = renderer_with(
        "<div>{{#each_discount_option}}<b>{{option_{{index}}_title}}</b>{{/each_discount_option}}</div>",
    );
    let mut rule = base_rule("r-two", DiscountType::VolumeSameProduct);
    rule.options = vec![
        tier(1, DiscountMode::Default, 0, "A"),
        tier(2, DiscountMode::Default, 0, "B"),
    ];

    let block =
        renderer.render_block(&[rule], &ProductId("p-1".to_string()), Decimal::TEN);
    assert_eq!(block.html, "<div><b>A</b><b>B</b></div>");
}

#[test]
fn conditional_scenario_suppresses_non_matching_badge() {
    let renderer = renderer_with(
        "{{#each_discount_option}}{{#if option_{{index}}_badgeStyle == 'most-popular'}}POP{{/if}}{{/each_discount_option}}",
    );
    let mut rule = base_rule("r-badge", DiscountType::VolumeSameProduct);
    rule.options = vec![DiscountOption::Tiered {
        quantity: 1,
        discount_mode: DiscountMode::Default,
        discount_value: Decimal::ZERO,
        copy: OptionCopy { badge_style: "simple".to_string(), ..OptionCopy::default() },
        selected_by_default: false,
    }];

    let block =
        renderer.render_block(&[rule], &ProductId("p-1".to_string()), Decimal::TEN);
    assert_eq!(block.html, "");
}

#[test]
fn loop_cardinality_matches_option_count() {
    let renderer = renderer_with("{{#each_discount_option}}X{{/each_discount_option}}");
    for count in 1..=5u32 {
        let mut rule = base_rule("r-n", DiscountType::VolumeSameProduct);
        rule.options =
            (0..count).map(|q| tier(q + 1, DiscountMode::Default, 0, "t")).collect();

        let block = renderer.render_block(
            std::slice::from_ref(&rule),
            &ProductId("p-1".to_string()),
            Decimal::TEN,
        );
        assert_eq!(block.html, "X".repeat(count as usize));
    }
}

#[test]
fn customer_pays_never_goes_negative() {
    let renderer = renderer_with("{{#each_discount_option}}x{{/each_discount_option}}");
    let mut rule = base_rule("r-floor", DiscountType::VolumeSameProduct);
    rule.options = vec![
        tier(1, DiscountMode::Fixed, 10_000, "Overcut"),
        tier(2, DiscountMode::Percentage, 99, "Deep"),
        tier(3, DiscountMode::Default, 0, "Plain"),
    ];

    let block =
        renderer.render_block(&[rule], &ProductId("p-1".to_string()), Decimal::TEN);
    for breakdown in &block.breakdowns {
        assert!(breakdown.customer_pays >= Decimal::ZERO);
        assert!(breakdown.discount_amount <= breakdown.base_total);
    }
}

#[test]
fn specific_rule_wins_even_when_except_is_scanned_first() {
    let renderer = renderer_with(
        "{{#each_discount_option}}{{option_{{index}}_title}}{{/each_discount_option}}",
    );
    let product = ProductId("p-1".to_string());

    let mut except = base_rule("b-except", DiscountType::VolumeSameProduct);
    except.visibility_primary = Some(PrimaryVisibility::Except);
    except.options = vec![tier(1, DiscountMode::Default, 0, "from-B")];

    let mut specific = base_rule("a-specific", DiscountType::VolumeSameProduct);
    specific.visibility_primary = Some(PrimaryVisibility::Specific);
    specific.primary_specific_product_ids.insert(product.clone());
    specific.options = vec![tier(1, DiscountMode::Default, 0, "from-A")];

    let block = renderer.render_block(&[except, specific], &product, Decimal::TEN);
    assert_eq!(block.rule_id.as_deref(), Some("a-specific"));
    assert_eq!(block.html, "from-A");
}

#[test]
fn builtin_bundle_template_resolves_every_directive() {
    let renderer = StorefrontBlockRenderer::with_builtin_catalog("$");
    let mut rule = base_rule("r-bundle", DiscountType::QuantityBreakMultiProduct);
    rule.options = vec![
        tier(2, DiscountMode::Percentage, 10, "Pair"),
        tier(4, DiscountMode::Percentage, 25, "Case"),
    ];

    let block =
        renderer.render_block(&[rule], &ProductId("p-1".to_string()), Decimal::TEN);
    assert_eq!(block.handle, "bundle-classic");
    assert!(block.html.contains("Pair"));
    assert!(block.html.contains("$18.00"));
    assert!(!block.html.contains("{{"));
    assert!(!block.html.contains("bundly-message"));
}

#[test]
fn builtin_catalog_renders_deterministic_html() {
    let renderer = StorefrontBlockRenderer::with_builtin_catalog("$");
    let mut rule = base_rule("r-builtin", DiscountType::VolumeSameProduct);
    rule.options = vec![
        tier(1, DiscountMode::Default, 0, "Single"),
        tier(3, DiscountMode::Percentage, 20, "Save {{saved_percentage}}"),
    ];
    let product = ProductId("p-1".to_string());

    let first = renderer.render_block(std::slice::from_ref(&rule), &product, Decimal::TEN);
    let second = renderer.render_block(std::slice::from_ref(&rule), &product, Decimal::TEN);
    assert_eq!(first, second);
    assert!(first.html.contains("Save 20%"));
    assert!(first.html.contains("$24.00"));
    assert!(!first.html.contains("{{option_"));
}
