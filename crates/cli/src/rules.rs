use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bundly_core::DiscountRule;

/// Reads a rule file holding either a single rule object or an array of
/// rules, and applies the admin-side normalization pass to each.
pub fn load_rules(path: &Path) -> Result<Vec<DiscountRule>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read rule file `{}`", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("rule file `{}` is not valid JSON", path.display()))?;

    let mut rules: Vec<DiscountRule> = if value.is_array() {
        serde_json::from_value(value).context("rule array did not match the rule schema")?
    } else {
        vec![serde_json::from_value(value).context("rule object did not match the rule schema")?]
    };

    for rule in &mut rules {
        rule.normalize();
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::load_rules;

    #[test]
    fn loads_single_rule_and_normalizes_percentages() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{
                "id": "rule-1",
                "discount_type": "volume-same-product",
                "status": "active",
                "options": [
                    {{ "kind": "tiered", "quantity": 2, "discount_mode": "percentage", "discount_value": 150 }}
                ]
            }}"#
        )
        .expect("write rule");

        let rules = load_rules(file.path()).expect("rule loads");
        assert_eq!(rules.len(), 1);
        rules[0].validate().expect("normalized rule is valid");
    }

    #[test]
    fn rejects_non_json_files() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");
        assert!(load_rules(file.path()).is_err());
    }
}
