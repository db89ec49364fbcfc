use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::option::DiscountOption;
use crate::domain::style::StyleConfig;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscountType {
    VolumeSameProduct,
    Bogo,
    QuantityBreakMultiProduct,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Draft,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryVisibility {
    All,
    Specific,
    Except,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleVisibility {
    BundleSpecific,
    BundleExcept,
}

/// A merchant-configured offer. Immutable for the duration of one render;
/// the admin side creates and edits rules, the engine only reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub id: RuleId,
    pub discount_type: DiscountType,
    pub options: Vec<DiscountOption>,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub visibility_primary: Option<PrimaryVisibility>,
    #[serde(default)]
    pub visibility_bundle: Option<BundleVisibility>,
    #[serde(default)]
    pub primary_specific_product_ids: HashSet<ProductId>,
    #[serde(default)]
    pub primary_except_product_ids: HashSet<ProductId>,
    #[serde(default)]
    pub bundle_specific_product_ids: HashSet<ProductId>,
    #[serde(default)]
    pub bundle_except_product_ids: HashSet<ProductId>,
    pub status: RuleStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl DiscountRule {
    pub fn is_active(&self) -> bool {
        self.status == RuleStatus::Active
    }

    /// True when the product id appears in any of the four visibility sets.
    pub fn lists_product(&self, product_id: &ProductId) -> bool {
        self.primary_specific_product_ids.contains(product_id)
            || self.primary_except_product_ids.contains(product_id)
            || self.bundle_specific_product_ids.contains(product_id)
            || self.bundle_except_product_ids.contains(product_id)
    }

    pub fn has_empty_id_sets(&self) -> bool {
        self.primary_specific_product_ids.is_empty()
            && self.primary_except_product_ids.is_empty()
            && self.bundle_specific_product_ids.is_empty()
            && self.bundle_except_product_ids.is_empty()
    }

    /// Applies per-option admin invariants after deserialization.
    pub fn normalize(&mut self) {
        for option in &mut self.options {
            option.normalize();
        }
    }

    /// Checks the invariants the admin side is supposed to uphold. The
    /// render path tolerates bad rules; this is for admin-facing tooling
    /// that wants to reject them loudly instead.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.options.is_empty() {
            return Err(DomainError::EmptyRule { rule_id: self.id.0.clone() });
        }
        if self.style.selected_style > 3 {
            return Err(DomainError::StyleOutOfRange {
                rule_id: self.id.0.clone(),
                selected_style: self.style.selected_style,
            });
        }
        for (index, option) in self.options.iter().enumerate() {
            self.validate_option(index, option)?;
        }
        Ok(())
    }

    fn validate_option(&self, index: usize, option: &DiscountOption) -> Result<(), DomainError> {
        let invalid = |message: &str| DomainError::InvalidOption {
            rule_id: self.id.0.clone(),
            index,
            message: message.to_string(),
        };

        match option {
            DiscountOption::Tiered { quantity, discount_mode, discount_value, .. } => {
                if *quantity == 0 {
                    return Err(invalid("quantity must be at least 1"));
                }
                if discount_value.is_sign_negative() {
                    return Err(invalid("discount value must not be negative"));
                }
                if *discount_mode == crate::domain::option::DiscountMode::Percentage
                    && (*discount_value < rust_decimal::Decimal::ONE
                        || *discount_value > rust_decimal::Decimal::from(99))
                {
                    return Err(invalid("percentage discount must be within 1..=99"));
                }
            }
            DiscountOption::BuyXGetY { buy_quantity, .. } => {
                if *buy_quantity == 0 {
                    return Err(invalid("buy quantity must be at least 1"));
                }
            }
        }
        Ok(())
    }
}
