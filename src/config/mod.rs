pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::{load, save_theme};
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

/// Where the product API lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.theme.name, "Catppuccin Mocha");
    }

    #[test]
    fn test_partial_keybinding_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [backend]
            base_url = "http://shop.internal:9000"

            [keybindings.products]
            delete = "x"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "http://shop.internal:9000");

        let resolver = KeyResolver::new(std::sync::Arc::new(config.keybindings));
        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert!(resolver.matches_products(&x, ProductsAction::Delete));
        assert!(resolver.matches_products(&r, ProductsAction::Reload));
    }
}
