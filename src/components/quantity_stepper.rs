//! Quantity Stepper
//!
//! `-`/`+` buttons next to a quantity input.

use dom_bindings::{bind_all, EventBinding};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlInputElement};

use super::quantity_input::{bound, parse_int, QuantityField, DEFAULT_QUANTITY};
use crate::config::{PageConfig, StepperBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Decrement,
    Increment,
}

/// Next value after one step.
///
/// With [`StepperBounds::FixedFloor`] a decrement only applies above 1 and an
/// increment is unbounded, whatever the field declares. With
/// [`StepperBounds::Declared`] the result is kept inside `min`/`max`
/// (`min` defaulting to 1). An unparseable current value counts as 1.
pub fn step_quantity(
    current: Option<i64>,
    step: Step,
    mode: StepperBounds,
    min: Option<i64>,
    max: Option<i64>,
) -> i64 {
    let value = current.unwrap_or(DEFAULT_QUANTITY);
    match (mode, step) {
        (StepperBounds::FixedFloor, Step::Decrement) if value > 1 => value - 1,
        (StepperBounds::FixedFloor, Step::Decrement) => value,
        (StepperBounds::FixedFloor, Step::Increment) => value.saturating_add(1),
        (StepperBounds::Declared, Step::Decrement) => {
            bound(value.saturating_sub(1), Some(min.unwrap_or(DEFAULT_QUANTITY)), max)
        }
        (StepperBounds::Declared, Step::Increment) => {
            bound(value.saturating_add(1), Some(min.unwrap_or(DEFAULT_QUANTITY)), max)
        }
    }
}

/// Step `field` in place and return the stored value
pub fn step_field(field: &impl QuantityField, step: Step, mode: StepperBounds) -> i64 {
    let next = step_quantity(
        parse_int(&field.raw_value()),
        step,
        mode,
        field.min_bound(),
        field.max_bound(),
    );
    field.set_quantity(next);
    next
}

/// The quantity input sharing a parent with `button`
fn paired_input(button: &Element, input_selector: &str) -> Option<HtmlInputElement> {
    button
        .parent_element()?
        .query_selector(input_selector)
        .ok()??
        .dyn_into::<HtmlInputElement>()
        .ok()
}

fn bind_steppers(
    root: &Element,
    button_selector: &str,
    key: &str,
    step: Step,
    config: &PageConfig,
) -> Result<Vec<EventBinding>, JsValue> {
    let input_selector = config.selectors.quantity_input.clone();
    let mode = config.stepper_bounds;

    bind_all::<HtmlElement, _, _>(root, button_selector, key, "click", move |button| {
        let input_selector = input_selector.clone();
        move |ev: web_sys::Event| {
            ev.prevent_default();
            match paired_input(&button, &input_selector) {
                Some(input) => {
                    step_field(&input, step, mode);
                }
                None => web_sys::console::warn_1(&"[FORM] Stepper button has no quantity input".into()),
            }
        }
    })
}

/// Bind every decrement/increment button under `root`
pub fn bind_quantity_steppers(root: &Element, config: &PageConfig) -> Result<Vec<EventBinding>, JsValue> {
    let mut bindings = bind_steppers(root, &config.selectors.decrement, "stepper-decrement", Step::Decrement, config)?;
    bindings.extend(bind_steppers(root, &config.selectors.increment, "stepper-increment", Step::Increment, config)?);
    Ok(bindings)
}
