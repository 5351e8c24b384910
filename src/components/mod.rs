//! Page Behaviors
//!
//! One module per server-rendered control the storefront enhances.

mod add_to_cart;
mod admin_chart;
mod cart_badge;
mod flash_messages;
mod quantity_input;
mod quantity_stepper;
mod required_form;

pub use add_to_cart::bind_add_to_cart;
pub use admin_chart::render_admin_chart;
pub use cart_badge::CartCounterSync;
pub use flash_messages::{bind_flash_messages, DismissSchedule, FlashDismissal};
pub use quantity_input::bind_quantity_inputs;
pub use quantity_stepper::bind_quantity_steppers;
pub use required_form::bind_required_forms;
