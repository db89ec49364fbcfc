use serde::{Deserialize, Serialize};

/// Flat styling knobs the merchant tunes in the admin. Every field lands in
/// the render context verbatim so block templates can splice them into
/// inline CSS.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Which of the four visual templates to use, 0..=3.
    pub selected_style: u8,
    pub background_color: String,
    pub border_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub badge_background_color: String,
    pub badge_text_color: String,
    pub font_size_px: u8,
    pub border_radius_px: u8,
    pub spacing_px: u8,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            selected_style: 0,
            background_color: "#ffffff".to_string(),
            border_color: "#e5e5e5".to_string(),
            text_color: "#1a1a1a".to_string(),
            accent_color: "#0a7d33".to_string(),
            badge_background_color: "#0a7d33".to_string(),
            badge_text_color: "#ffffff".to_string(),
            font_size_px: 14,
            border_radius_px: 8,
            spacing_px: 12,
        }
    }
}

impl StyleConfig {
    /// Context entries shared by every block template.
    pub fn context_entries(&self) -> Vec<(String, String)> {
        vec![
            ("style_background_color".to_string(), self.background_color.clone()),
            ("style_border_color".to_string(), self.border_color.clone()),
            ("style_text_color".to_string(), self.text_color.clone()),
            ("style_accent_color".to_string(), self.accent_color.clone()),
            (
                "style_badge_background_color".to_string(),
                self.badge_background_color.clone(),
            ),
            ("style_badge_text_color".to_string(), self.badge_text_color.clone()),
            ("style_font_size".to_string(), self.font_size_px.to_string()),
            ("style_border_radius".to_string(), self.border_radius_px.to_string()),
            ("style_spacing".to_string(), self.spacing_px.to_string()),
        ]
    }
}
