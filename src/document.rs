//! Full HTML document for the sandboxed surface (iframe `srcdoc`).

use crate::error::{BridgeError, BridgeResult};
use crate::fragment::Fragment;
use crate::markup;
use serde::{Deserialize, Serialize};

/// Policy applied when a config does not set one: nothing loads except inline
/// styles and images from data/https URLs. No scripts.
pub const DEFAULT_CONTENT_SECURITY_POLICY: &str =
    "default-src 'none'; style-src 'unsafe-inline'; img-src data: https:";

fn default_title() -> String {
    "Page".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_csp() -> String {
    DEFAULT_CONTENT_SECURITY_POLICY.to_string()
}

/// Document shell settings, usually loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_csp", rename = "contentSecurityPolicy")]
    pub content_security_policy: String,
    #[serde(default, rename = "baseStyles")]
    pub base_styles: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            lang: default_lang(),
            content_security_policy: default_csp(),
            base_styles: String::new(),
        }
    }
}

impl DocumentConfig {
    /// Parse and validate a config from YAML. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> BridgeResult<Self> {
        let config: DocumentConfig = if yaml.trim().is_empty() {
            DocumentConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if self.title.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "title must be a non-empty string".to_string(),
            ));
        }
        if self.lang.trim().is_empty() || self.lang.contains(char::is_whitespace) {
            return Err(BridgeError::InvalidConfig(format!(
                "lang '{}' must be a non-empty language tag",
                self.lang
            )));
        }
        Ok(())
    }
}

/// Keep a `<style>` body from closing its own element.
fn neutralize_style_text(css: &str) -> String {
    css.replace("</", "<\\/")
}

/// Wrap `body` in a complete document. Title, language and policy are escaped;
/// the body is embedded as-is.
pub fn render_document(config: &DocumentConfig, body: Fragment) -> Fragment {
    let styles = Fragment::mark_trusted(neutralize_style_text(&config.base_styles));
    markup!(
        r#"<!DOCTYPE html>
<html lang="{}">
<head>
<meta charset="UTF-8">
<meta http-equiv="Content-Security-Policy" content="{}">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
<style>{}</style>
</head>
<body>
{}
</body>
</html>
"#,
        config.lang.as_str(),
        config.content_security_policy.as_str(),
        config.title.as_str(),
        styles,
        body,
    )
}
