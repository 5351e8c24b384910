//! Required-Field Forms
//!
//! Blocks submission while any `[required]` field is blank.

use dom_bindings::{bind_all, select_all, EventBinding};
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlFormElement};

use crate::config::PageConfig;
use crate::notice::{AlertNotifier, Notifier};

pub trait RequiredField {
    fn current_value(&self) -> String;
    fn set_invalid(&self, invalid: bool);
}

/// A required form control plus the class that flags it invalid
pub struct FormField<'a> {
    pub element: Element,
    pub invalid_class: &'a str,
}

impl RequiredField for FormField<'_> {
    fn current_value(&self) -> String {
        // input, select and textarea all expose `value`
        js_sys::Reflect::get(&self.element, &JsValue::from_str("value"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    }

    fn set_invalid(&self, invalid: bool) {
        let _ = self
            .element
            .class_list()
            .toggle_with_force(self.invalid_class, invalid);
    }
}

/// Flag blank fields, clear the rest. Returns true when every field is filled.
pub fn validate_required<F: RequiredField>(fields: &[F]) -> bool {
    let mut valid = true;
    for field in fields {
        let blank = field.current_value().trim().is_empty();
        field.set_invalid(blank);
        valid &= !blank;
    }
    valid
}

/// Validate required fields on every form under `root` at submit time
pub fn bind_required_forms(root: &Element, config: &PageConfig) -> Result<Vec<EventBinding>, JsValue> {
    let field_selector = config.selectors.required_field.clone();
    let invalid_class = config.selectors.invalid_class.clone();
    let message = config.messages.missing_required.clone();

    bind_all::<HtmlFormElement, _, _>(root, &config.selectors.form, "required-form", "submit", move |form| {
        let field_selector = field_selector.clone();
        let invalid_class = invalid_class.clone();
        let message = message.clone();
        move |ev: web_sys::Event| {
            let fields: Vec<FormField> = match select_all(&form, &field_selector) {
                Ok(found) => found
                    .into_iter()
                    .map(|element| FormField {
                        element,
                        invalid_class: &invalid_class,
                    })
                    .collect(),
                Err(_) => return,
            };
            if !validate_required(&fields) {
                ev.prevent_default();
                AlertNotifier.notify(&message);
            }
        }
    })
}
