// ============================================================================
// Console Core - Watermark Settings
// File: crates/console-core/src/domain/watermark.rs
// Description: Page watermark configuration persisted per browser/profile
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const DEFAULT_WATERMARK_TEXT: &str = "内部资料 禁止外传";

/// Watermark settings, stored as JSON under `watermarkSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct WatermarkSettings {
    pub enabled: bool,

    #[validate(length(max = 100, message = "Watermark text too long"))]
    pub text: String,

    #[validate(range(min = 0.01, max = 0.5, message = "Opacity must be between 0.01 and 0.5"))]
    pub opacity: f64,

    #[validate(range(min = 10, max = 30, message = "Font size must be between 10 and 30"))]
    pub font_size: u32,

    #[validate(custom(function = "validate_color"))]
    pub color: String,

    #[validate(range(min = -90, max = 90, message = "Rotation must be between -90 and 90"))]
    pub rotate: i32,

    #[validate(range(min = 50, max = 300, message = "Gap must be between 50 and 300"))]
    pub gap: u32,

    /// Render the signed-in user instead of `text`.
    pub user_info: bool,
}

impl Default for WatermarkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            text: DEFAULT_WATERMARK_TEXT.to_string(),
            opacity: 0.08,
            font_size: 18,
            color: "#000000".to_string(),
            rotate: -30,
            gap: 150,
            user_info: true,
        }
    }
}

/// The signed-in user as cached by the login flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WatermarkUser {
    pub username: String,
    pub real_name: String,
}

impl WatermarkSettings {
    /// Text actually drawn on the page.
    pub fn display_text(&self, user: Option<&WatermarkUser>) -> String {
        if self.user_info {
            if let Some(user) = user {
                let username = if user.username.is_empty() { "用户" } else { &user.username };
                return if user.real_name.is_empty() {
                    username.to_string()
                } else {
                    format!("{} - {}", username, user.real_name)
                };
            }
        }
        if self.text.is_empty() {
            DEFAULT_WATERMARK_TEXT.to_string()
        } else {
            self.text.clone()
        }
    }
}

fn validate_color(color: &str) -> Result<(), ValidationError> {
    if console_shared::utils::is_hex_color(color) {
        Ok(())
    } else {
        Err(ValidationError::new("color").with_message("Color must be a hex value".into()))
    }
}
