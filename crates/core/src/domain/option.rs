use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Merchant-authored copy shown on one option row. Title, subtitle and
/// label may embed `{{saved_percentage}}` / `{{saved_total}}` micro-tokens
/// that are resolved against the option's own computed numbers before the
/// block template ever sees them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCopy {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub badge_text: String,
    #[serde(default)]
    pub badge_style: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMode {
    #[default]
    Default,
    Percentage,
    Fixed,
}

/// One selectable tier within a discount rule, tagged by discount kind so
/// the BOGO and tiered field sets cannot be mixed on a single option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountOption {
    /// Volume break or multi-product tier: quantity plus a price adjustment.
    Tiered {
        quantity: u32,
        #[serde(default)]
        discount_mode: DiscountMode,
        #[serde(default, deserialize_with = "coerce_decimal")]
        discount_value: Decimal,
        #[serde(flatten)]
        copy: OptionCopy,
        #[serde(default)]
        selected_by_default: bool,
    },
    /// Buy X get Y free.
    BuyXGetY {
        buy_quantity: u32,
        #[serde(default)]
        free_quantity: u32,
        #[serde(flatten)]
        copy: OptionCopy,
        #[serde(default)]
        selected_by_default: bool,
    },
}

impl DiscountOption {
    pub fn copy(&self) -> &OptionCopy {
        match self {
            Self::Tiered { copy, .. } | Self::BuyXGetY { copy, .. } => copy,
        }
    }

    pub fn selected_by_default(&self) -> bool {
        match self {
            Self::Tiered { selected_by_default, .. }
            | Self::BuyXGetY { selected_by_default, .. } => *selected_by_default,
        }
    }

    /// Applies the admin-side invariants: percentage values live in [1, 99]
    /// and no stored value may be negative. Fixed amounts keep their raw
    /// magnitude; the calculator floors them against the base total.
    pub fn normalize(&mut self) {
        if let Self::Tiered { discount_mode, discount_value, .. } = self {
            if discount_value.is_sign_negative() {
                *discount_value = Decimal::ZERO;
            }
            if *discount_mode == DiscountMode::Percentage {
                *discount_value =
                    (*discount_value).clamp(Decimal::ONE, Decimal::from(99));
            }
        }
    }
}

/// Upstream configuration occasionally delivers `discount_value` as a quoted
/// string or omits it entirely. This boundary is the one place bad data is
/// forgiven: anything that does not parse as a number becomes zero.
fn coerce_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(number) => {
            number.to_string().parse().unwrap_or(Decimal::ZERO)
        }
        serde_json::Value::String(text) => text.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    })
}
