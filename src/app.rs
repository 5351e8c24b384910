//! Storefront Page
//!
//! Binds every behavior to the server-rendered document and keeps the
//! bindings alive for the life of the page.

use std::cell::RefCell;
use std::rc::Rc;

use dom_bindings::EventBinding;
use leptos::prelude::Owner;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MutationObserver, MutationObserverInit, MutationRecord};

use crate::components::{
    bind_add_to_cart, bind_flash_messages, bind_quantity_inputs, bind_quantity_steppers,
    bind_required_forms, render_admin_chart, CartCounterSync, DismissSchedule, FlashDismissal,
};
use crate::config::PageConfig;
use crate::context::CartContext;

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Listeners and timers attached to one subtree.
/// Dropping it detaches the listeners and cancels pending dismissals.
#[derive(Default)]
pub struct Bindings {
    listeners: Vec<EventBinding>,
    dismissals: Vec<FlashDismissal>,
}

impl Bindings {
    pub fn len(&self) -> usize {
        self.listeners.len() + self.dismissals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bind every per-element behavior found in `root` (including `root` itself)
pub fn bind(root: &Element, ctx: CartContext) -> Result<Bindings, JsValue> {
    let config = ctx.with_config(PageConfig::clone);
    let schedule = DismissSchedule {
        fade_after_ms: config.flash_delay_ms,
        fade_ms: config.flash_fade_ms,
    };

    let mut listeners = bind_add_to_cart(root, ctx)?;
    listeners.extend(bind_quantity_inputs(root, &config.selectors.quantity_input)?);
    listeners.extend(bind_quantity_steppers(root, &config)?);
    listeners.extend(bind_required_forms(root, &config)?);
    let dismissals = bind_flash_messages(root, &config.selectors.flash, schedule)?;

    Ok(Bindings {
        listeners,
        dismissals,
    })
}

/// Drop the bindings of every subtree that has left the document
fn prune_detached<R>(bound: &mut Vec<(R, Bindings)>, is_connected: impl Fn(&R) -> bool) -> usize {
    let before = bound.len();
    bound.retain(|(root, _)| is_connected(root));
    before - bound.len()
}

/// Binds elements inserted after start
struct InsertionWatcher {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
    _bound: Rc<RefCell<Vec<(Element, Bindings)>>>,
}

impl InsertionWatcher {
    fn watch(body: &Element, ctx: CartContext) -> Result<Self, JsValue> {
        let bound: Rc<RefCell<Vec<(Element, Bindings)>>> = Rc::default();
        let sink = Rc::clone(&bound);

        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |records: js_sys::Array, _observer: MutationObserver| {
                let records: Vec<MutationRecord> = records
                    .iter()
                    .filter_map(|r| r.dyn_into::<MutationRecord>().ok())
                    .collect();

                // prune first so nodes moved out of a removed subtree bind again below
                if records.iter().any(|r| r.removed_nodes().length() > 0) {
                    prune_detached(&mut sink.borrow_mut(), |root| root.is_connected());
                }

                for record in &records {
                    let added = record.added_nodes();
                    for i in 0..added.length() {
                        let Some(el) = added.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                            continue;
                        };
                        match bind(&el, ctx) {
                            Ok(bindings) if !bindings.is_empty() => sink.borrow_mut().push((el, bindings)),
                            Ok(_) => {}
                            Err(e) => web_sys::console::error_2(&"[PAGE] Binding inserted element failed:".into(), &e),
                        }
                    }
                }
            },
        );

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(body, &init)?;

        Ok(Self {
            observer,
            _callback: callback,
            _bound: bound,
        })
    }
}

impl Drop for InsertionWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// A started storefront page
pub struct Page {
    _owner: Owner,
    _sync: Option<CartCounterSync>,
    _bindings: Bindings,
    _watcher: Option<InsertionWatcher>,
}

impl Page {
    pub fn start(document: &Document, config: PageConfig) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        let root: &Element = &body;

        let badge = document.query_selector(&config.selectors.cart_count)?;
        let observe = config.observe_mutations;
        let chart_anchor = config.selectors.chart_anchor.clone();

        let owner = Owner::new();
        let (ctx, sync) = owner.with(|| {
            let ctx = CartContext::new(config);
            let sync = match badge {
                Some(badge) => Some(CartCounterSync::start(ctx, badge)),
                None => {
                    web_sys::console::warn_1(&"[CART] No cart badge on page, not polling".into());
                    None
                }
            };
            (ctx, sync)
        });

        render_admin_chart(root, &chart_anchor);

        let bindings = bind(root, ctx)?;
        web_sys::console::log_1(&format!("[PAGE] Bound {} behaviors", bindings.len()).into());

        let watcher = if observe {
            Some(InsertionWatcher::watch(root, ctx)?)
        } else {
            None
        };

        Ok(Self {
            _owner: owner,
            _sync: sync,
            _bindings: bindings,
            _watcher: watcher,
        })
    }
}

fn launch(document: &Document) {
    let config = PageConfig::load(document);
    match Page::start(document, config) {
        Ok(page) => PAGE.with(|slot| *slot.borrow_mut() = Some(page)),
        Err(e) => web_sys::console::error_2(&"[PAGE] Start failed:".into(), &e),
    }
}

/// Start the page now, or once the DOM has been parsed
pub fn start_page() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let mut pending = Some(document.clone());
        EventBinding::new(&document, "DOMContentLoaded", move |_| {
            if let Some(doc) = pending.take() {
                launch(&doc);
            }
        })?
        .forget();
    } else {
        launch(&document);
    }
    Ok(())
}
