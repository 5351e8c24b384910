//! Cart Context
//!
//! Shared cart state for every bound behavior on the page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::config::PageConfig;

/// Page-wide cart state
#[derive(Clone, Copy)]
pub struct CartContext {
    /// Last count reported by the server (None until the first answer)
    pub count: ReadSignal<Option<u32>>,
    set_count: WriteSignal<Option<u32>>,
    config: StoredValue<PageConfig>,
}

impl CartContext {
    pub fn new(config: PageConfig) -> Self {
        let (count, set_count) = signal(None::<u32>);
        Self {
            count,
            set_count,
            config: StoredValue::new(config),
        }
    }

    /// Read a value out of the page config
    pub fn with_config<T>(&self, f: impl FnOnce(&PageConfig) -> T) -> T {
        self.config.with_value(f)
    }

    /// Re-read the cart count from the server.
    ///
    /// Overlapping refreshes are not serialized; whichever answer lands last
    /// wins. On failure the previous count stays on screen.
    pub fn refresh(&self) {
        let url = self.with_config(|c| c.cart_count_url.clone());
        let set_count = self.set_count;
        spawn_local(async move {
            match commands::fetch_cart_count(&url).await {
                Ok(count) => set_count.set(Some(count)),
                Err(e) => {
                    web_sys::console::warn_1(&format!("[CART] Count refresh failed: {}", e).into());
                }
            }
        });
    }
}
