//! Cart Badge
//!
//! Keeps the navbar cart counter in step with the server.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use web_sys::Element;

use crate::context::CartContext;

/// Running badge sync. Dropping it stops the polling.
pub struct CartCounterSync {
    _interval: Interval,
}

impl CartCounterSync {
    /// Mirror the cart count into `badge`, fetch it now, then every
    /// `poll_interval_ms`.
    pub fn start(ctx: CartContext, badge: Element) -> Self {
        Effect::new(move |_| {
            if let Some(count) = ctx.count.get() {
                badge.set_text_content(Some(&count.to_string()));
            }
        });

        ctx.refresh();
        let interval_ms = ctx.with_config(|c| c.poll_interval_ms);
        let interval = Interval::new(interval_ms, move || ctx.refresh());
        Self { _interval: interval }
    }
}
