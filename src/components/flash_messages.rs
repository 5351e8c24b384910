//! Flash Messages
//!
//! Fades out and removes server-rendered alert banners.

use std::cell::RefCell;
use std::rc::Rc;

use dom_bindings::{select_all_as, Claim};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement};

/// When a banner starts fading and how long the fade lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissSchedule {
    pub fade_after_ms: u32,
    pub fade_ms: u32,
}

impl DismissSchedule {
    /// Delay from binding until the banner leaves the document
    pub fn removal_after_ms(&self) -> u32 {
        self.fade_after_ms.saturating_add(self.fade_ms)
    }

    fn transition(&self) -> String {
        format!("opacity {}ms", self.fade_ms)
    }
}

/// A dismissable banner
pub trait Banner: Clone + 'static {
    fn fade_out(&self, transition: &str);
    fn detach(&self);
}

impl Banner for HtmlElement {
    fn fade_out(&self, transition: &str) {
        let style = self.style();
        let _ = style.set_property("transition", transition);
        let _ = style.set_property("opacity", "0");
    }

    fn detach(&self) {
        self.remove();
        web_sys::console::log_1(&"[FLASH] Banner dismissed".into());
    }
}

/// One-shot timers. Dropping a `Pending` cancels it.
pub trait Scheduler: Clone + 'static {
    type Pending: 'static;

    fn after(&self, ms: u32, task: Box<dyn FnOnce()>) -> Self::Pending;
}

/// Browser `setTimeout`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

impl Scheduler for BrowserTimers {
    type Pending = Timeout;

    fn after(&self, ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(ms, task)
    }
}

/// Pending fade and removal of one banner. Dropping it cancels whatever
/// has not run yet.
pub struct Dismissal<P> {
    _delay: P,
    _fade: Rc<RefCell<Option<P>>>,
}

/// Fade `banner` after `fade_after_ms`, then detach it `fade_ms` later
pub fn schedule_dismissal<B: Banner, S: Scheduler>(
    banner: B,
    schedule: DismissSchedule,
    timers: &S,
) -> Dismissal<S::Pending> {
    let fade: Rc<RefCell<Option<S::Pending>>> = Rc::new(RefCell::new(None));
    let fade_slot = Rc::clone(&fade);
    let fade_timers = timers.clone();

    let delay = timers.after(
        schedule.fade_after_ms,
        Box::new(move || {
            banner.fade_out(&schedule.transition());
            let pending = fade_timers.after(schedule.fade_ms, Box::new(move || banner.detach()));
            *fade_slot.borrow_mut() = Some(pending);
        }),
    );

    Dismissal {
        _delay: delay,
        _fade: fade,
    }
}

/// Dismissal of a page banner, holding its claim
pub struct FlashDismissal {
    _dismissal: Dismissal<Timeout>,
    _claim: Claim,
}

/// Schedule dismissal of every banner under `root`
pub fn bind_flash_messages(
    root: &Element,
    selector: &str,
    schedule: DismissSchedule,
) -> Result<Vec<FlashDismissal>, JsValue> {
    let mut dismissals = Vec::new();
    for banner in select_all_as::<HtmlElement>(root, selector)? {
        if let Some(claim) = Claim::acquire(&banner, "flash-dismiss") {
            dismissals.push(FlashDismissal {
                _dismissal: schedule_dismissal(banner, schedule, &BrowserTimers),
                _claim: claim,
            });
        }
    }
    if !dismissals.is_empty() {
        web_sys::console::log_1(
            &format!(
                "[FLASH] {} banner(s) leave in {}ms",
                dismissals.len(),
                schedule.removal_after_ms()
            )
            .into(),
        );
    }
    Ok(dismissals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Task {
        due: u32,
        cancelled: Rc<Cell<bool>>,
        run: Box<dyn FnOnce()>,
    }

    /// Manually advanced clock
    #[derive(Clone, Default)]
    struct FakeClock {
        now: Rc<Cell<u32>>,
        tasks: Rc<RefCell<Vec<Task>>>,
    }

    struct FakeTimer(Rc<Cell<bool>>);

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    impl Scheduler for FakeClock {
        type Pending = FakeTimer;

        fn after(&self, ms: u32, task: Box<dyn FnOnce()>) -> FakeTimer {
            let cancelled = Rc::new(Cell::new(false));
            self.tasks.borrow_mut().push(Task {
                due: self.now.get() + ms,
                cancelled: Rc::clone(&cancelled),
                run: task,
            });
            FakeTimer(cancelled)
        }
    }

    impl FakeClock {
        fn advance_to(&self, t: u32) {
            loop {
                let next = {
                    let mut tasks = self.tasks.borrow_mut();
                    tasks.retain(|task| !task.cancelled.get());
                    let earliest = tasks
                        .iter()
                        .enumerate()
                        .filter(|(_, task)| task.due <= t)
                        .min_by_key(|(_, task)| task.due)
                        .map(|(i, _)| i);
                    earliest.map(|i| tasks.remove(i))
                };
                match next {
                    Some(task) => {
                        self.now.set(task.due);
                        (task.run)();
                    }
                    None => break,
                }
            }
            self.now.set(t);
        }
    }

    #[derive(Clone)]
    struct FakeBanner {
        transition: Rc<RefCell<Option<String>>>,
        attached: Rc<Cell<bool>>,
    }

    impl FakeBanner {
        fn new() -> Self {
            Self {
                transition: Rc::new(RefCell::new(None)),
                attached: Rc::new(Cell::new(true)),
            }
        }
    }

    impl Banner for FakeBanner {
        fn fade_out(&self, transition: &str) {
            *self.transition.borrow_mut() = Some(transition.to_string());
        }
        fn detach(&self) {
            self.attached.set(false);
        }
    }

    const STOREFRONT: DismissSchedule = DismissSchedule {
        fade_after_ms: 3000,
        fade_ms: 500,
    };

    #[test]
    fn test_banner_stays_until_delay_then_fades_and_leaves() {
        let clock = FakeClock::default();
        let banner = FakeBanner::new();
        let _dismissal = schedule_dismissal(banner.clone(), STOREFRONT, &clock);

        clock.advance_to(2999);
        assert!(banner.attached.get());
        assert_eq!(*banner.transition.borrow(), None);

        clock.advance_to(3000);
        assert!(banner.attached.get());
        assert_eq!(banner.transition.borrow().as_deref(), Some("opacity 500ms"));

        clock.advance_to(3499);
        assert!(banner.attached.get());

        clock.advance_to(STOREFRONT.removal_after_ms());
        assert!(!banner.attached.get());
        assert_eq!(STOREFRONT.removal_after_ms(), 3500);
    }

    #[test]
    fn test_dropping_dismissal_cancels_it() {
        let clock = FakeClock::default();
        let banner = FakeBanner::new();
        let dismissal = schedule_dismissal(banner.clone(), STOREFRONT, &clock);

        clock.advance_to(1000);
        drop(dismissal);
        clock.advance_to(10_000);

        assert!(banner.attached.get());
        assert_eq!(*banner.transition.borrow(), None);
    }

    #[test]
    fn test_dropping_mid_fade_keeps_banner() {
        let clock = FakeClock::default();
        let banner = FakeBanner::new();
        let dismissal = schedule_dismissal(banner.clone(), STOREFRONT, &clock);

        clock.advance_to(3200);
        drop(dismissal);
        clock.advance_to(10_000);

        assert!(banner.attached.get());
    }

    #[test]
    fn test_removal_saturates() {
        let schedule = DismissSchedule {
            fade_after_ms: u32::MAX,
            fade_ms: 500,
        };
        assert_eq!(schedule.removal_after_ms(), u32::MAX);
    }
}
