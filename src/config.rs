//! Page Configuration
//!
//! Endpoints, timings, selectors and messages. Defaults match the stock
//! storefront templates; a page can override any subset through an inline
//! `<script type="application/json" id="bookstore-config">` block.

use serde::Deserialize;
use web_sys::Document;

/// Id of the optional inline JSON config element
pub const CONFIG_ELEMENT_ID: &str = "bookstore-config";

/// How stepper buttons bound the quantity they change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepperBounds {
    /// Decrement stops at 1, increment is unbounded
    #[default]
    FixedFloor,
    /// Both directions respect the input's declared `min`/`max`
    Declared,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub cart_count: String,
    pub add_to_cart: String,
    /// Data attribute carrying the book id on add-to-cart controls
    pub book_id_attr: String,
    pub quantity_input: String,
    pub decrement: String,
    pub increment: String,
    pub form: String,
    pub required_field: String,
    pub invalid_class: String,
    pub flash: String,
    pub chart_anchor: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            cart_count: "#cart-count".to_string(),
            add_to_cart: ".add-to-cart".to_string(),
            book_id_attr: "data-book-id".to_string(),
            quantity_input: r#"input[type="number"]"#.to_string(),
            decrement: ".quantity-decrement".to_string(),
            increment: ".quantity-increment".to_string(),
            form: "form".to_string(),
            required_field: "[required]".to_string(),
            invalid_class: "is-invalid".to_string(),
            flash: ".alert".to_string(),
            chart_anchor: "#sales-chart".to_string(),
        }
    }
}

/// User-facing notice texts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Messages {
    pub added: String,
    pub add_failed: String,
    pub missing_required: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            added: "Book added to cart!".to_string(),
            add_failed: "Error adding to cart".to_string(),
            missing_required: "Please fill in all required fields.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub cart_count_url: String,
    pub cart_add_url: String,
    pub poll_interval_ms: u32,
    pub flash_delay_ms: u32,
    pub flash_fade_ms: u32,
    pub stepper_bounds: StepperBounds,
    /// Bind controls inserted after page start
    pub observe_mutations: bool,
    pub selectors: Selectors,
    pub messages: Messages,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            cart_count_url: "/api/cart/count".to_string(),
            cart_add_url: "/cart/add".to_string(),
            poll_interval_ms: 30_000,
            flash_delay_ms: 3_000,
            flash_fade_ms: 500,
            stepper_bounds: StepperBounds::default(),
            observe_mutations: true,
            selectors: Selectors::default(),
            messages: Messages::default(),
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the inline config block, falling back to defaults
    pub fn load(document: &Document) -> Self {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };
        if text.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&text) {
            Ok(config) => config,
            Err(e) => {
                web_sys::console::warn_1(
                    &format!("[PAGE] Ignoring invalid #{}: {}", CONFIG_ELEMENT_ID, e).into(),
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_storefront() {
        let config = PageConfig::default();
        assert_eq!(config.cart_count_url, "/api/cart/count");
        assert_eq!(config.cart_add_url, "/cart/add");
        assert_eq!(config.poll_interval_ms, 30_000);
        assert_eq!(config.flash_delay_ms, 3_000);
        assert_eq!(config.flash_fade_ms, 500);
        assert_eq!(config.stepper_bounds, StepperBounds::FixedFloor);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = PageConfig::from_json(
            r#"{"poll_interval_ms": 5000, "selectors": {"flash": ".flash"}, "stepper_bounds": "declared"}"#,
        )
        .unwrap();

        assert_eq!(config.poll_interval_ms, 5000);
        assert_eq!(config.stepper_bounds, StepperBounds::Declared);
        assert_eq!(config.selectors.flash, ".flash");
        assert_eq!(config.selectors.cart_count, "#cart-count");
        assert_eq!(config.messages, Messages::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(PageConfig::from_json(r#"{"poll_interval": 5000}"#).is_err());
        assert!(PageConfig::from_json(r#"{"messages": {"oops": "x"}}"#).is_err());
    }
}
