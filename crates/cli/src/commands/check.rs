use std::path::PathBuf;

use bundly_core::{eligibility, ProductId};
use serde::Serialize;

use crate::commands::CommandResult;
use crate::rules;

pub struct CheckArgs {
    pub rule_path: PathBuf,
    /// When given, also report which rule would win for this product.
    pub product_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    command: String,
    status: String,
    rules: usize,
    active_rules: usize,
    issues: Vec<String>,
    resolution: Option<ResolutionSummary>,
}

#[derive(Debug, Serialize)]
struct ResolutionSummary {
    product_id: String,
    winning_rule: Option<String>,
    ambiguous_except_matches: bool,
}

/// Validates a rule file the way the admin side is expected to before
/// persisting, and flags overlapping except-type rules.
pub fn run(args: &CheckArgs) -> CommandResult {
    let rules = match rules::load_rules(&args.rule_path) {
        Ok(rules) => rules,
        Err(error) => {
            return CommandResult::failure("check", "rule_file", format!("{error:#}"), 2);
        }
    };

    let mut issues: Vec<String> = Vec::new();
    for rule in &rules {
        if let Err(error) = rule.validate() {
            issues.push(error.to_string());
        }
    }

    let active: Vec<_> = rules.iter().filter(|rule| rule.is_active()).cloned().collect();

    let resolution = args.product_id.as_ref().map(|product_id| {
        let product = ProductId(product_id.clone());
        let (winner, report) = eligibility::resolve_report(&active, &product);
        if report.is_ambiguous() {
            issues.push(format!(
                "{} except-type rules match product `{product_id}`; the last one scanned wins",
                report.except_matches
            ));
        }
        ResolutionSummary {
            product_id: product_id.clone(),
            winning_rule: winner.map(|resolution| resolution.rule.id.0.clone()),
            ambiguous_except_matches: report.is_ambiguous(),
        }
    });

    let status = if issues.is_empty() { "ok" } else { "invalid" };
    let report = CheckReport {
        command: "check".to_string(),
        status: status.to_string(),
        rules: rules.len(),
        active_rules: active.len(),
        issues,
        resolution,
    };

    let exit_code = u8::from(report.status != "ok");
    let output = serde_json::to_string_pretty(&report)
        .unwrap_or_else(|error| format!("{{\"command\":\"check\",\"status\":\"error\",\"message\":\"{error}\"}}"));
    CommandResult { exit_code, output }
}
