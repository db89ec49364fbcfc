//! Built-in block template catalog.
//!
//! One template text per handle produced by `styles::map_handle`. The
//! texts are written in the storefront grammar (`{{name}}`,
//! `{{#each_discount_option}}`, `{{#if …}}`) and are read-only at render
//! time; tests and the CLI may overlay custom texts.

use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockTemplate {
    pub handle: String,
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct BlockCatalog {
    templates: HashMap<String, String>,
}

impl BlockCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catalog shipped with the widget, covering all twelve handles.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for (handle, text) in BUILTIN_TEMPLATES {
            catalog.insert(handle, text);
        }
        catalog
    }

    pub fn insert(&mut self, handle: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(handle.into(), text.into());
    }

    pub fn get(&self, handle: &str) -> Option<&str> {
        self.templates.get(handle).map(String::as_str)
    }

    pub fn handles(&self) -> Vec<&str> {
        let mut handles: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        handles.sort_unstable();
        handles
    }

    /// Snapshot of the catalog contents, sorted by handle.
    pub fn templates(&self) -> Vec<BlockTemplate> {
        self.handles()
            .into_iter()
            .map(|handle| BlockTemplate {
                handle: handle.to_string(),
                text: self.templates[handle].clone(),
            })
            .collect()
    }
}

const BUILTIN_TEMPLATES: [(&str, &str); 12] = [
    ("volume-classic", VOLUME_CLASSIC),
    ("volume-cards", VOLUME_CARDS),
    ("volume-horizontal", VOLUME_HORIZONTAL),
    ("volume-minimal", VOLUME_MINIMAL),
    ("bogo-classic", BOGO_CLASSIC),
    ("bogo-cards", BOGO_CARDS),
    ("bogo-horizontal", BOGO_HORIZONTAL),
    ("bogo-minimal", BOGO_MINIMAL),
    ("bundle-classic", BUNDLE_CLASSIC),
    ("bundle-cards", BUNDLE_CARDS),
    ("bundle-horizontal", BUNDLE_HORIZONTAL),
    ("bundle-minimal", BUNDLE_MINIMAL),
];

const VOLUME_CLASSIC: &str = r#"<div class="bundly-block bundly-volume-classic" style="background:{{style_background_color}};border:1px solid {{style_border_color}};border-radius:{{style_border_radius}}px;color:{{style_text_color}};font-size:{{style_font_size}}px">
{{#each_discount_option}}<label class="bundly-row {{option_{{index}}_checked}}" style="padding:{{style_spacing}}px">
<input type="radio" name="bundly-option" value="{{option_{{index}}_index}}" {{option_{{index}}_checked}}>
<span class="bundly-title">{{option_{{index}}_title}}</span>
{{#if option_{{index}}_subtitle}}<span class="bundly-subtitle">{{option_{{index}}_subtitle}}</span>{{/if}}
{{#if option_{{index}}_badgeText}}<span class="bundly-badge bundly-badge-{{option_{{index}}_badgeStyle}}" style="background:{{style_badge_background_color}};color:{{style_badge_text_color}}">{{option_{{index}}_badgeText}}</span>{{/if}}
<span class="bundly-price">{{currency_symbol}}{{option_{{index}}_customerPays}}</span>
{{#if option_{{index}}_savedTotal}}<s class="bundly-compare">{{currency_symbol}}{{option_{{index}}_baseTotal}}</s>{{/if}}
</label>
{{/each_discount_option}}</div>"#;

const VOLUME_CARDS: &str = r#"<div class="bundly-block bundly-volume-cards" style="color:{{style_text_color}}">
{{#each_discount_option}}<div class="bundly-card {{option_{{index}}_checked}}" style="border:1px solid {{style_border_color}};border-radius:{{style_border_radius}}px">
{{#if option_{{index}}_badgeStyle == 'most-popular'}}<div class="bundly-ribbon" style="background:{{style_accent_color}}">{{option_{{index}}_badgeText}}</div>{{/if}}
<div class="bundly-qty">{{option_{{index}}_quantity}}x</div>
<div class="bundly-title">{{option_{{index}}_title}}</div>
<div class="bundly-price">{{currency_symbol}}{{option_{{index}}_customerPays}}</div>
{{#if option_{{index}}_label}}<div class="bundly-label">{{option_{{index}}_label}}</div>{{/if}}
</div>
{{/each_discount_option}}</div>"#;

const VOLUME_HORIZONTAL: &str = r#"<div class="bundly-block bundly-volume-horizontal">
{{#each_discount_option}}<button class="bundly-pill {{option_{{index}}_checked}}" style="border-radius:{{style_border_radius}}px;border:1px solid {{style_border_color}}">
{{option_{{index}}_quantity}} for {{currency_symbol}}{{option_{{index}}_customerPays}}
{{#if option_{{index}}_savedPercentage}}<em>-{{option_{{index}}_savedPercentage}}%</em>{{/if}}
</button>
{{/each_discount_option}}</div>"#;

const VOLUME_MINIMAL: &str = r#"<ul class="bundly-block bundly-volume-minimal">
{{#each_discount_option}}<li>{{option_{{index}}_title}} — {{currency_symbol}}{{option_{{index}}_customerPays}}</li>
{{/each_discount_option}}</ul>"#;

const BOGO_CLASSIC: &str = r#"<div class="bundly-block bundly-bogo-classic" style="background:{{style_background_color}};color:{{style_text_color}};font-size:{{style_font_size}}px">
{{#each_discount_option}}<label class="bundly-row {{option_{{index}}_checked}}">
<input type="radio" name="bundly-option" value="{{option_{{index}}_index}}" {{option_{{index}}_checked}}>
<span class="bundly-title">{{option_{{index}}_title}}</span>
<span class="bundly-deal">Buy {{option_{{index}}_buyQuantity}}, get {{option_{{index}}_freeQuantity}} free</span>
{{#if option_{{index}}_badgeText}}<span class="bundly-badge" style="background:{{style_badge_background_color}};color:{{style_badge_text_color}}">{{option_{{index}}_badgeText}}</span>{{/if}}
<span class="bundly-price">{{currency_symbol}}{{option_{{index}}_customerPays}}</span>
<s class="bundly-compare">{{currency_symbol}}{{option_{{index}}_baseTotal}}</s>
</label>
{{/each_discount_option}}</div>"#;

const BOGO_CARDS: &str = r#"<div class="bundly-block bundly-bogo-cards">
{{#each_discount_option}}<div class="bundly-card {{option_{{index}}_checked}}" style="border:1px solid {{style_border_color}}">
<div class="bundly-deal">{{option_{{index}}_buyQuantity}} + {{option_{{index}}_freeQuantity}} free</div>
<div class="bundly-title">{{option_{{index}}_title}}</div>
{{#if option_{{index}}_subtitle}}<div class="bundly-subtitle">{{option_{{index}}_subtitle}}</div>{{/if}}
<div class="bundly-price">{{currency_symbol}}{{option_{{index}}_customerPays}}</div>
{{#if option_{{index}}_savedPercentage}}<div class="bundly-save" style="color:{{style_accent_color}}">{{option_{{index}}_savedPercentage}}% off</div>{{/if}}
</div>
{{/each_discount_option}}</div>"#;

const BOGO_HORIZONTAL: &str = r#"<div class="bundly-block bundly-bogo-horizontal">
{{#each_discount_option}}<button class="bundly-pill {{option_{{index}}_checked}}">
{{option_{{index}}_buyQuantity}}+{{option_{{index}}_freeQuantity}} — {{currency_symbol}}{{option_{{index}}_customerPays}}
</button>
{{/each_discount_option}}</div>"#;

const BOGO_MINIMAL: &str = r#"<ul class="bundly-block bundly-bogo-minimal">
{{#each_discount_option}}<li>{{option_{{index}}_title}}: pay {{currency_symbol}}{{option_{{index}}_customerPays}}</li>
{{/each_discount_option}}</ul>"#;

const BUNDLE_CLASSIC: &str = r#"<div class="bundly-block bundly-bundle-classic" style="background:{{style_background_color}};border:1px solid {{style_border_color}};color:{{style_text_color}}">
{{#each_discount_option}}<label class="bundly-row {{option_{{index}}_checked}}" style="padding:{{style_spacing}}px">
<input type="radio" name="bundly-option" value="{{option_{{index}}_index}}" {{option_{{index}}_checked}}>
<span class="bundly-title">{{option_{{index}}_title}}</span>
{{#if option_{{index}}_label}}<span class="bundly-label">{{option_{{index}}_label}}</span>{{/if}}
<span class="bundly-price">{{currency_symbol}}{{option_{{index}}_customerPays}}</span>
</label>
{{/each_discount_option}}</div>"#;

const BUNDLE_CARDS: &str = r#"<div class="bundly-block bundly-bundle-cards">
{{#each_discount_option}}<div class="bundly-card {{option_{{index}}_checked}}" style="border-radius:{{style_border_radius}}px">
<div class="bundly-qty">{{option_{{index}}_quantity}} items</div>
<div class="bundly-title">{{option_{{index}}_title}}</div>
<div class="bundly-price">{{currency_symbol}}{{option_{{index}}_customerPays}}</div>
{{#if option_{{index}}_badgeText}}<div class="bundly-badge">{{option_{{index}}_badgeText}}</div>{{/if}}
</div>
{{/each_discount_option}}</div>"#;

const BUNDLE_HORIZONTAL: &str = r#"<div class="bundly-block bundly-bundle-horizontal">
{{#each_discount_option}}<button class="bundly-pill {{option_{{index}}_checked}}">
{{option_{{index}}_quantity}} for {{currency_symbol}}{{option_{{index}}_customerPays}}
</button>
{{/each_discount_option}}</div>"#;

const BUNDLE_MINIMAL: &str = r#"<ul class="bundly-block bundly-bundle-minimal">
{{#each_discount_option}}<li>{{option_{{index}}_title}} — {{currency_symbol}}{{option_{{index}}_customerPays}}</li>
{{/each_discount_option}}</ul>"#;

#[cfg(test)]
mod tests {
    use crate::styles::map_handle;
    use crate::domain::rule::DiscountType;

    use super::BlockCatalog;

    #[test]
    fn builtin_catalog_covers_every_mapped_handle() {
        let catalog = BlockCatalog::builtin();
        for discount_type in [
            DiscountType::VolumeSameProduct,
            DiscountType::Bogo,
            DiscountType::QuantityBreakMultiProduct,
        ] {
            for style in 0..4 {
                let handle = map_handle(discount_type, style).expect("mapped handle");
                assert!(catalog.get(handle).is_some(), "missing template for {handle}");
            }
        }
    }

    #[test]
    fn custom_text_overlays_builtin() {
        let mut catalog = BlockCatalog::builtin();
        catalog.insert("volume-classic", "custom");
        assert_eq!(catalog.get("volume-classic"), Some("custom"));
    }

    #[test]
    fn handles_listing_is_sorted() {
        let catalog = BlockCatalog::builtin();
        let handles = catalog.handles();
        assert_eq!(handles.len(), 12);
        let mut sorted = handles.clone();
        sorted.sort_unstable();
        assert_eq!(handles, sorted);
    }
}
