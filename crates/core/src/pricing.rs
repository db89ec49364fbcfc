use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::option::{DiscountMode, DiscountOption};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The computed money story for a single option at a given unit price.
/// All values stay at full precision; rounding happens only when a figure
/// is formatted into the render context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Total units the shopper receives (paid plus free).
    pub total_quantity: u32,
    /// Units the shopper pays for.
    pub paid_quantity: u32,
    pub free_quantity: u32,
    pub base_total: Decimal,
    pub discount_amount: Decimal,
    pub customer_pays: Decimal,
    pub saved_total: Decimal,
    pub saved_percentage: Decimal,
    /// For BOGO this is the "value" percentage conveyed to the shopper
    /// (free share of the bundle); for price-mode options it equals
    /// `saved_percentage`.
    pub effective_percentage: Decimal,
}

/// Prices one option. Returns `None` for a BOGO option with a non-positive
/// buy quantity or unit price; such an option produces no line at all
/// rather than an error.
pub fn compute_option(option: &DiscountOption, unit_price: Decimal) -> Option<Breakdown> {
    match option {
        DiscountOption::Tiered { quantity, discount_mode, discount_value, .. } => {
            Some(compute_tiered(*quantity, *discount_mode, *discount_value, unit_price))
        }
        DiscountOption::BuyXGetY { buy_quantity, free_quantity, .. } => {
            compute_bogo(*buy_quantity, *free_quantity, unit_price)
        }
    }
}

fn compute_tiered(
    quantity: u32,
    mode: DiscountMode,
    value: Decimal,
    unit_price: Decimal,
) -> Breakdown {
    let base_total = unit_price * Decimal::from(quantity);
    let discount_amount = match mode {
        DiscountMode::Default => Decimal::ZERO,
        DiscountMode::Percentage => base_total * value / ONE_HUNDRED,
        // Fixed amounts come off the line total, floored so pay stays >= 0.
        DiscountMode::Fixed => value.min(base_total),
    };
    let customer_pays = base_total - discount_amount;
    let saved_percentage = ratio_percentage(discount_amount, base_total);

    Breakdown {
        total_quantity: quantity,
        paid_quantity: quantity,
        free_quantity: 0,
        base_total,
        discount_amount,
        customer_pays,
        saved_total: discount_amount,
        saved_percentage,
        effective_percentage: saved_percentage,
    }
}

fn compute_bogo(buy_quantity: u32, free_quantity: u32, unit_price: Decimal) -> Option<Breakdown> {
    if buy_quantity == 0 || unit_price <= Decimal::ZERO {
        return None;
    }

    let total_quantity = buy_quantity + free_quantity;
    let base_total = Decimal::from(total_quantity) * unit_price;
    let customer_pays = Decimal::from(buy_quantity) * unit_price;
    let discount_amount = base_total - customer_pays;
    let effective_percentage =
        Decimal::from(free_quantity) / Decimal::from(total_quantity) * ONE_HUNDRED;

    Some(Breakdown {
        total_quantity,
        paid_quantity: buy_quantity,
        free_quantity,
        base_total,
        discount_amount,
        customer_pays,
        saved_total: discount_amount,
        saved_percentage: ratio_percentage(discount_amount, base_total),
        effective_percentage,
    })
}

/// `part / whole * 100` with a zero-base guard so the result is always a
/// finite number, never a division failure.
fn ratio_percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() || part <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        part / whole * ONE_HUNDRED
    }
}

/// Formats a money figure as a plain 2-decimal string, e.g. `24.00`.
pub fn format_money(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// Formats a percentage as a rounded whole number, e.g. `60`.
pub fn format_percent(value: Decimal) -> String {
    let mut rounded = value.round_dp(0);
    rounded.rescale(0);
    rounded.to_string()
}
