//! DOM Binding Utilities
//!
//! Subtree queries and event listeners that detach themselves on drop.
//! Framework-free so it can bind server-rendered markup.

use std::cell::RefCell;
use std::collections::HashMap;

use js_sys::WeakSet;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget};

/// An event listener attached to a DOM target.
///
/// Dropping the binding removes the listener. Call [`EventBinding::forget`]
/// to leave it attached for the lifetime of the page instead.
pub struct EventBinding {
    target: EventTarget,
    event: &'static str,
    callback: Option<Closure<dyn FnMut(Event)>>,
    claim: Option<Claim>,
}

impl EventBinding {
    /// Attach `handler` to `event` on `target`
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback: Some(callback),
            claim: None,
        })
    }

    /// Tie a [`Claim`] to this listener so both are released together
    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claim = Some(claim);
        self
    }

    /// Leak the closure so the listener outlives this value
    pub fn forget(mut self) {
        if let Some(cb) = self.callback.take() {
            cb.forget();
        }
        if let Some(claim) = self.claim.take() {
            claim.forget();
        }
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        if let Some(cb) = self.callback.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, cb.as_ref().unchecked_ref());
        }
    }
}

/// Identity-keyed membership for claims.
///
/// Membership follows the node object, not its markup: a `cloneNode` copy is
/// a different member.
pub trait ClaimSet<T>: Clone {
    fn contains(&self, item: &T) -> bool;
    fn insert(&self, item: &T);
    fn remove(&self, item: &T);
}

impl ClaimSet<Element> for WeakSet {
    fn contains(&self, item: &Element) -> bool {
        self.has(item.as_ref())
    }

    fn insert(&self, item: &Element) {
        self.add(item.as_ref());
    }

    fn remove(&self, item: &Element) {
        self.delete(item.as_ref());
    }
}

thread_local! {
    static CLAIM_SETS: RefCell<HashMap<String, WeakSet>> = RefCell::new(HashMap::new());
}

fn claim_set(key: &str) -> WeakSet {
    CLAIM_SETS.with(|sets| {
        sets.borrow_mut()
            .entry(key.to_string())
            .or_insert_with(WeakSet::new)
            .clone()
    })
}

/// Marks an element as bound for one behavior.
///
/// Claims live in one `WeakSet` per key, outside the DOM, so an element that
/// is moved is never bound twice while a clone of it is bound afresh.
/// Dropping the claim releases it.
pub struct Claim<T = Element, S: ClaimSet<T> = WeakSet> {
    set: S,
    item: Option<T>,
}

impl Claim {
    /// Claim `element` for `key`, or `None` if it is already claimed
    pub fn acquire(element: &Element, key: &str) -> Option<Self> {
        Self::acquire_in(&claim_set(key), element)
    }
}

impl<T: Clone, S: ClaimSet<T>> Claim<T, S> {
    /// Claim `item` in `set`, or `None` if it is already a member
    pub fn acquire_in(set: &S, item: &T) -> Option<Self> {
        if set.contains(item) {
            return None;
        }
        set.insert(item);
        Some(Self {
            set: set.clone(),
            item: Some(item.clone()),
        })
    }

    /// Keep the claim for the lifetime of the element
    pub fn forget(mut self) {
        self.item = None;
    }
}

impl<T, S: ClaimSet<T>> Drop for Claim<T, S> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.set.remove(&item);
        }
    }
}

/// All elements under `root` matching `selector`, `root` itself first when it matches
pub fn select_all(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    let mut found = Vec::new();
    if root.matches(selector)? {
        found.push(root.clone());
    }
    let nodes = root.query_selector_all(selector)?;
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            found.push(el);
        }
    }
    Ok(found)
}

/// Like [`select_all`], keeping only elements of type `T`
pub fn select_all_as<T: JsCast>(root: &Element, selector: &str) -> Result<Vec<T>, JsValue> {
    Ok(select_all(root, selector)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<T>().ok())
        .collect())
}

/// Attach one listener per element matching `selector` under `root`.
///
/// Elements already claimed for `key`, or not of type `T`, are skipped.
/// `make_handler` receives the matched element and returns its handler.
pub fn bind_all<T, F, H>(
    root: &Element,
    selector: &str,
    key: &str,
    event: &'static str,
    mut make_handler: F,
) -> Result<Vec<EventBinding>, JsValue>
where
    T: JsCast,
    F: FnMut(T) -> H,
    H: FnMut(Event) + 'static,
{
    let mut bindings = Vec::new();
    for el in select_all(root, selector)? {
        if !el.has_type::<T>() {
            continue;
        }
        let Some(claim) = Claim::acquire(&el, key) else {
            continue;
        };
        let target: EventTarget = el.clone().into();
        let handler = make_handler(el.unchecked_into::<T>());
        bindings.push(EventBinding::new(&target, event, handler)?.with_claim(claim));
    }
    Ok(bindings)
}
