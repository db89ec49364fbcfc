pub mod catalog;
pub mod config;
pub mod domain;
pub mod eligibility;
pub mod errors;
pub mod microtext;
pub mod pricing;
pub mod render;
pub mod styles;
pub mod template;

pub use catalog::{BlockCatalog, BlockTemplate};
pub use domain::option::{DiscountMode, DiscountOption, OptionCopy};
pub use domain::rule::{
    BundleVisibility, DiscountRule, DiscountType, PrimaryVisibility, ProductId, RuleId, RuleStatus,
};
pub use domain::style::StyleConfig;
pub use eligibility::{resolve, resolve_report, MatchTier, Resolution, ResolutionReport};
pub use errors::DomainError;
pub use pricing::{compute_option, format_money, format_percent, Breakdown};
pub use render::{BlockRenderer, RenderedBlock, StorefrontBlockRenderer};
pub use styles::map_handle;
pub use template::{render as render_template, RenderContext};
