pub mod lexer;
pub mod render;

use std::collections::HashMap;

pub use lexer::{tokenize, Token};
pub use render::render;

/// The flattened key→value map fed into one template expansion. Built per
/// render call, consumed, discarded; never shared across requests.
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    values: HashMap<String, String>,
    option_count: usize,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Missing keys read as the empty string; templates never fail on an
    /// unresolved name.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map_or("", String::as_str)
    }

    /// How many `{{#each_discount_option}}` iterations to unroll.
    pub fn set_option_count(&mut self, count: usize) {
        self.option_count = count;
    }

    pub fn option_count(&self) -> usize {
        self.option_count
    }
}
