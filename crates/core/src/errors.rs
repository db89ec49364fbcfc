use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("rule `{rule_id}` has no options")]
    EmptyRule { rule_id: String },
    #[error("rule `{rule_id}` option {index}: {message}")]
    InvalidOption { rule_id: String, index: usize, message: String },
    #[error("rule `{rule_id}` selected style {selected_style} is out of range (0..=3)")]
    StyleOutOfRange { rule_id: String, selected_style: u8 },
}
