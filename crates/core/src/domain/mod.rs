pub mod option;
pub mod rule;
pub mod style;

pub use option::{DiscountMode, DiscountOption, OptionCopy};
pub use rule::{DiscountRule, DiscountType, ProductId, RuleId, RuleStatus};
pub use style::StyleConfig;
