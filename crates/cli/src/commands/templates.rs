use bundly_core::BlockCatalog;

use crate::commands::CommandResult;

/// Lists the built-in block templates, one `handle (bytes)` line each.
pub fn run() -> CommandResult {
    let catalog = BlockCatalog::builtin();
    let lines: Vec<String> = catalog
        .templates()
        .into_iter()
        .map(|template| format!("{} ({} bytes)", template.handle, template.text.len()))
        .collect();
    CommandResult::raw(lines.join("\n"))
}
