//! Quantity Inputs
//!
//! Keeps numeric quantity fields inside their declared `min`/`max`.

use dom_bindings::{bind_all, EventBinding};
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlInputElement};

/// Value used when a field has no usable `min` to fall back to
pub const DEFAULT_QUANTITY: i64 = 1;

/// Lenient integer parse, as browsers do for form values.
///
/// Skips leading whitespace, accepts one sign, then reads the longest run of
/// ASCII digits: `"3.9"` is 3, `"12abc"` is 12, `"abc"` is `None`.
/// Out-of-range digit runs saturate.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let run: Vec<i64> = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect();
    if run.is_empty() {
        return None;
    }
    let magnitude = run
        .iter()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(*d));
    Some(if negative { -magnitude } else { magnitude })
}

/// Apply bounds in the storefront's order: above `max` goes to `max`, then
/// below `min` goes to `min`. A missing bound is open.
pub fn bound(value: i64, min: Option<i64>, max: Option<i64>) -> i64 {
    let mut value = value;
    if let Some(max) = max {
        if value > max {
            value = max;
        }
    }
    if let Some(min) = min {
        if value < min {
            value = min;
        }
    }
    value
}

/// Clamp a raw field value. Unparseable input resets to `min`.
pub fn clamp_quantity(raw: &str, min: Option<i64>, max: Option<i64>) -> i64 {
    let value = parse_int(raw).unwrap_or_else(|| min.unwrap_or(DEFAULT_QUANTITY));
    bound(value, min, max)
}

/// A numeric field with declared bounds
pub trait QuantityField {
    fn raw_value(&self) -> String;
    fn min_bound(&self) -> Option<i64>;
    fn max_bound(&self) -> Option<i64>;
    fn set_quantity(&self, value: i64);
}

impl QuantityField for HtmlInputElement {
    fn raw_value(&self) -> String {
        self.value()
    }

    fn min_bound(&self) -> Option<i64> {
        parse_int(&self.min())
    }

    fn max_bound(&self) -> Option<i64> {
        parse_int(&self.max())
    }

    fn set_quantity(&self, value: i64) {
        self.set_value(&value.to_string());
    }
}

/// Clamp `field` in place and return the stored value
pub fn clamp_field(field: &impl QuantityField) -> i64 {
    let value = clamp_quantity(&field.raw_value(), field.min_bound(), field.max_bound());
    field.set_quantity(value);
    value
}

/// Clamp every quantity input under `root` whenever it changes
pub fn bind_quantity_inputs(root: &Element, selector: &str) -> Result<Vec<EventBinding>, JsValue> {
    bind_all::<HtmlInputElement, _, _>(root, selector, "quantity-clamp", "change", |input| {
        move |_ev: web_sys::Event| {
            clamp_field(&input);
        }
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;

    /// In-memory number input
    pub struct FakeInput {
        pub value: RefCell<String>,
        pub min: Option<i64>,
        pub max: Option<i64>,
    }

    impl FakeInput {
        pub fn new(value: &str, min: Option<i64>, max: Option<i64>) -> Self {
            Self {
                value: RefCell::new(value.to_string()),
                min,
                max,
            }
        }
    }

    impl QuantityField for FakeInput {
        fn raw_value(&self) -> String {
            self.value.borrow().clone()
        }
        fn min_bound(&self) -> Option<i64> {
            self.min
        }
        fn max_bound(&self) -> Option<i64> {
            self.max
        }
        fn set_quantity(&self, value: i64) {
            *self.value.borrow_mut() = value.to_string();
        }
    }

    #[test]
    fn test_parse_int_is_lenient() {
        assert_eq!(parse_int("5"), Some(5));
        assert_eq!(parse_int("  7"), Some(7));
        assert_eq!(parse_int("3.9"), Some(3));
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("-4"), Some(-4));
        assert_eq!(parse_int("+8"), Some(8));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_clamp_examples() {
        assert_eq!(clamp_quantity("15", Some(1), Some(10)), 10);
        assert_eq!(clamp_quantity("0", Some(1), Some(10)), 1);
        assert_eq!(clamp_quantity("4", Some(1), Some(10)), 4);
        assert_eq!(clamp_quantity("", Some(2), Some(10)), 2);
        assert_eq!(clamp_quantity("x", None, Some(10)), DEFAULT_QUANTITY);
        assert_eq!(clamp_quantity("500", Some(1), None), 500);
    }

    #[test]
    fn test_clamp_field_writes_back() {
        let input = FakeInput::new("42", Some(1), Some(5));
        assert_eq!(clamp_field(&input), 5);
        assert_eq!(input.raw_value(), "5");
    }

    proptest! {
        #[test]
        fn clamp_lands_in_range(v in any::<i64>(), a in -1000i64..1000, b in -1000i64..1000) {
            let (min, max) = (a.min(b), a.max(b));
            let out = clamp_quantity(&v.to_string(), Some(min), Some(max));
            prop_assert!(min <= out && out <= max);
        }

        #[test]
        fn clamp_keeps_in_range_values(min in -1000i64..1000, span in 0i64..1000, offset in 0i64..1000) {
            let max = min + span;
            let v = min + offset % (span + 1);
            prop_assert_eq!(clamp_quantity(&v.to_string(), Some(min), Some(max)), v);
        }

        #[test]
        fn clamp_resets_garbage_to_min(raw in "[a-zA-Z ]*", min in -1000i64..1000, span in 0i64..1000) {
            prop_assert_eq!(clamp_quantity(&raw, Some(min), Some(min + span)), min);
        }
    }
}
