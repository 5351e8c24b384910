//! Add-to-Cart Buttons
//!
//! Turns `.add-to-cart` links/buttons into async cart posts.

use dom_bindings::{bind_all, EventBinding};
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement};

use crate::commands;
use crate::config::Messages;
use crate::context::CartContext;
use crate::error::{CartError, CartResult};
use crate::models::AddToCartRequest;
use crate::notice::{AlertNotifier, Notifier};

/// What the shopper is told after a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Failed(String),
}

impl AddOutcome {
    pub fn from_result(result: CartResult<()>, messages: &Messages) -> Self {
        match result {
            Ok(()) => Self::Added,
            Err(CartError::Rejected(Some(message))) if !message.is_empty() => Self::Failed(message),
            Err(_) => Self::Failed(messages.add_failed.clone()),
        }
    }

    /// Refresh the badge on success, then show the matching notice
    pub fn report(&self, messages: &Messages, notifier: &impl Notifier, refresh: impl FnOnce()) {
        match self {
            Self::Added => {
                refresh();
                notifier.notify(&messages.added);
            }
            Self::Failed(message) => notifier.notify(message),
        }
    }
}

/// Book id carried by an add-to-cart control
fn book_id(control: &Element, attr: &str) -> CartResult<String> {
    control
        .get_attribute(attr)
        .filter(|id| !id.trim().is_empty())
        .ok_or(CartError::MissingBookId)
}

/// Bind every add-to-cart control under `root`.
///
/// Each click posts independently; repeated clicks are not de-duplicated.
pub fn bind_add_to_cart(root: &Element, ctx: CartContext) -> Result<Vec<EventBinding>, JsValue> {
    let (selector, attr) = ctx.with_config(|c| {
        (c.selectors.add_to_cart.clone(), c.selectors.book_id_attr.clone())
    });

    bind_all::<HtmlElement, _, _>(root, &selector, "add-to-cart", "click", move |control| {
        let attr = attr.clone();
        move |ev: web_sys::Event| {
            ev.prevent_default();
            let book_id = match book_id(&control, &attr) {
                Ok(id) => id,
                Err(e) => {
                    web_sys::console::warn_1(&format!("[CART] {}", e).into());
                    return;
                }
            };

            spawn_local(async move {
                let (url, messages) = ctx.with_config(|c| (c.cart_add_url.clone(), c.messages.clone()));
                let result = match commands::add_to_cart(&url, &AddToCartRequest::single(book_id)).await {
                    Ok(answer) => answer.into_result(),
                    Err(e) => {
                        web_sys::console::error_1(&format!("[CART] Add to cart failed: {}", e).into());
                        Err(e)
                    }
                };
                AddOutcome::from_result(result, &messages).report(&messages, &AlertNotifier, || ctx.refresh());
            });
        }
    })
}
