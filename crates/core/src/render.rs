use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;

use crate::catalog::BlockCatalog;
use crate::domain::option::DiscountOption;
use crate::domain::rule::{DiscountRule, DiscountType, ProductId};
use crate::eligibility;
use crate::microtext;
use crate::pricing::{self, Breakdown};
use crate::styles;
use crate::template::{self, RenderContext};

/// The expanded block plus the raw numbers behind it, for callers that
/// need figures rather than HTML (analytics, non-HTML channels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderedBlock {
    pub html: String,
    pub handle: String,
    pub rule_id: Option<String>,
    pub breakdowns: Vec<Breakdown>,
}

impl RenderedBlock {
    fn empty() -> Self {
        Self { html: String::new(), handle: String::new(), rule_id: None, breakdowns: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

pub trait BlockRenderer: Send + Sync {
    fn render_block(
        &self,
        candidates: &[DiscountRule],
        product_id: &ProductId,
        unit_price: Decimal,
    ) -> RenderedBlock;
}

/// Stateless driver: resolve rule, price options, pick template, build
/// context, expand. Every call is independent, so arbitrary concurrent
/// renders are safe.
#[derive(Clone, Debug)]
pub struct StorefrontBlockRenderer {
    catalog: BlockCatalog,
    currency_symbol: String,
}

impl StorefrontBlockRenderer {
    pub fn new(catalog: BlockCatalog, currency_symbol: impl Into<String>) -> Self {
        Self { catalog, currency_symbol: currency_symbol.into() }
    }

    pub fn with_builtin_catalog(currency_symbol: impl Into<String>) -> Self {
        Self::new(BlockCatalog::builtin(), currency_symbol)
    }

    /// Renders the block for one already-resolved rule.
    pub fn render_rule(&self, rule: &DiscountRule, unit_price: Decimal) -> RenderedBlock {
        let Some(handle) = styles::map_handle(rule.discount_type, rule.style.selected_style)
        else {
            return RenderedBlock::empty();
        };
        let Some(text) = self.catalog.get(handle) else {
            return RenderedBlock::empty();
        };

        let priced: Vec<(&DiscountOption, Breakdown)> = rule
            .options
            .iter()
            .filter_map(|option| {
                pricing::compute_option(option, unit_price).map(|breakdown| (option, breakdown))
            })
            .collect();
        if priced.is_empty() {
            return RenderedBlock::empty();
        }

        let context = self.build_context(rule, &priced);
        let html = template::render(text, &context);

        RenderedBlock {
            html,
            handle: handle.to_string(),
            rule_id: Some(rule.id.0.clone()),
            breakdowns: priced.into_iter().map(|(_, breakdown)| breakdown).collect(),
        }
    }

    fn build_context(
        &self,
        rule: &DiscountRule,
        priced: &[(&DiscountOption, Breakdown)],
    ) -> RenderContext {
        let mut context = RenderContext::new();
        context.set("currency_symbol", self.currency_symbol.clone());
        context.set("discount_type", discount_type_key(rule.discount_type));
        for (key, value) in rule.style.context_entries() {
            context.set(key, value);
        }
        context.set_option_count(priced.len());

        for (i, (option, breakdown)) in priced.iter().enumerate() {
            self.set_option_entries(&mut context, i, option, breakdown);
        }
        context
    }

    fn set_option_entries(
        &self,
        context: &mut RenderContext,
        i: usize,
        option: &DiscountOption,
        breakdown: &Breakdown,
    ) {
        let copy = option.copy();
        let symbol = self.currency_symbol.as_str();
        let set = |context: &mut RenderContext, field: &str, value: String| {
            context.set(format!("option_{i}_{field}"), value);
        };

        set(context, "index", i.to_string());
        set(context, "title", microtext::resolve_copy(&copy.title, breakdown, symbol));
        set(context, "subtitle", microtext::resolve_copy(&copy.subtitle, breakdown, symbol));
        set(context, "label", microtext::resolve_copy(&copy.label, breakdown, symbol));
        set(context, "badgeText", microtext::resolve_copy(&copy.badge_text, breakdown, symbol));
        set(context, "badgeStyle", copy.badge_style.clone());

        set(context, "quantity", breakdown.total_quantity.to_string());
        set(context, "buyQuantity", breakdown.paid_quantity.to_string());
        set(context, "freeQuantity", breakdown.free_quantity.to_string());
        set(context, "baseTotal", pricing::format_money(breakdown.base_total));
        set(context, "customerPays", pricing::format_money(breakdown.customer_pays));

        // Zero savings enter the context as empty strings so plain truthy
        // conditionals can hide the compare-at price.
        let saved = breakdown.saved_total > Decimal::ZERO;
        set(
            context,
            "savedTotal",
            if saved { pricing::format_money(breakdown.saved_total) } else { String::new() },
        );
        set(
            context,
            "savedPercentage",
            if saved { pricing::format_percent(breakdown.saved_percentage) } else { String::new() },
        );
        set(context, "effectivePercentage", pricing::format_percent(breakdown.effective_percentage));

        set(
            context,
            "checked",
            if option.selected_by_default() { "checked".to_string() } else { String::new() },
        );
        set(context, "message", String::new());
    }
}

impl BlockRenderer for StorefrontBlockRenderer {
    fn render_block(
        &self,
        candidates: &[DiscountRule],
        product_id: &ProductId,
        unit_price: Decimal,
    ) -> RenderedBlock {
        match eligibility::resolve(candidates, product_id) {
            Some(rule) => self.render_rule(rule, unit_price),
            None => RenderedBlock::empty(),
        }
    }
}

fn discount_type_key(discount_type: DiscountType) -> &'static str {
    match discount_type {
        DiscountType::VolumeSameProduct => "volume-same-product",
        DiscountType::Bogo => "bogo",
        DiscountType::QuantityBreakMultiProduct => "quantity-break-multi-product",
    }
}
