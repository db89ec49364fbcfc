//! Micro-template pass for merchant-authored copy.
//!
//! Titles, subtitles and labels may embed tokens such as
//! `{{saved_percentage}}` that refer to the option's own computed numbers.
//! This pass runs before the block-level render context is built, so by the
//! time the template engine sees the copy it is plain text.

use rust_decimal::Decimal;

use crate::pricing::{format_money, format_percent, Breakdown};

/// Resolves the micro-tokens in one copy field against one breakdown.
/// Unknown tokens become the empty string; this pass never fails.
pub fn resolve_copy(text: &str, breakdown: &Breakdown, currency_symbol: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        match after_open.find("}}") {
            Some(close) => {
                let token = after_open[..close].trim();
                output.push_str(&resolve_token(token, breakdown, currency_symbol));
                rest = &after_open[close + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}

fn resolve_token(token: &str, breakdown: &Breakdown, currency_symbol: &str) -> String {
    match token {
        "saved_percentage" => format!("{}%", format_percent(breakdown.saved_percentage)),
        "saved_total" => format!("{currency_symbol}{}", round_whole(breakdown.saved_total)),
        "customer_pays" => format_money(breakdown.customer_pays),
        "base_total" => format_money(breakdown.base_total),
        "discount_amount" => format_money(breakdown.discount_amount),
        "quantity" => breakdown.total_quantity.to_string(),
        "free_quantity" => breakdown.free_quantity.to_string(),
        _ => String::new(),
    }
}

fn round_whole(value: Decimal) -> String {
    let mut rounded = value.round_dp(0);
    rounded.rescale(0);
    rounded.to_string()
}
