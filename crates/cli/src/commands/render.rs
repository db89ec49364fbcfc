use std::fs;
use std::path::{Path, PathBuf};

use bundly_core::config::AppConfig;
use bundly_core::{
    BlockCatalog, BlockRenderer, DiscountRule, ProductId, StorefrontBlockRenderer,
};
use rust_decimal::Decimal;
use tracing::info;

use crate::commands::CommandResult;
use crate::rules;

pub struct RenderArgs {
    pub rule_path: PathBuf,
    pub product_id: String,
    pub unit_price: Decimal,
    /// Optional template text file overlaying the mapped handle.
    pub template_path: Option<PathBuf>,
}

/// Renders the block for one product view and prints the HTML. An empty
/// block is a success with empty output, matching storefront semantics.
pub fn run(config: &AppConfig, args: &RenderArgs) -> CommandResult {
    let rules = match rules::load_rules(&args.rule_path) {
        Ok(rules) => rules,
        Err(error) => {
            return CommandResult::failure("render", "rule_file", format!("{error:#}"), 2);
        }
    };

    let candidates: Vec<_> = rules.into_iter().filter(DiscountRule::is_active).collect();

    let catalog = match load_catalog(&candidates, args.template_path.as_deref()) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure("render", "template_file", error, 2);
        }
    };

    let renderer = StorefrontBlockRenderer::new(catalog, config.currency_symbol.clone());
    let product_id = ProductId(args.product_id.clone());
    let block = renderer.render_block(&candidates, &product_id, args.unit_price);

    info!(
        event_name = "render.block.completed",
        product_id = %args.product_id,
        rule_id = block.rule_id.as_deref().unwrap_or("none"),
        handle = %block.handle,
        options = block.breakdowns.len(),
        "rendered storefront block"
    );
    CommandResult::raw(block.html)
}

/// Builds the catalog for this invocation: the built-in set, with the
/// override file (when given) mapped onto every handle the candidate rules
/// could select.
fn load_catalog(
    candidates: &[DiscountRule],
    template_path: Option<&Path>,
) -> Result<BlockCatalog, String> {
    let mut catalog = BlockCatalog::builtin();
    if let Some(path) = template_path {
        let text = fs::read_to_string(path)
            .map_err(|error| format!("could not read template file `{}`: {error}", path.display()))?;
        for rule in candidates {
            if let Some(handle) =
                bundly_core::map_handle(rule.discount_type, rule.style.selected_style)
            {
                catalog.insert(handle, text.clone());
            }
        }
    }
    Ok(catalog)
}
