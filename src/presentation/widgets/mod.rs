mod alert_popup;
mod confirm_dialog;
mod footer_bar;
mod input;
mod nav_bar;
mod selector;

pub use alert_popup::{AlertPopup, centered};
pub use confirm_dialog::{ConfirmChoice, ConfirmDialog};
pub use footer_bar::{FooterBar, FooterBarStyle};
pub use input::TextInput;
pub use nav_bar::{NavBar, NavBarStyle};
pub use selector::Selector;
