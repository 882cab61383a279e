mod confirm_dialog;
mod input;
mod nav_bar;

pub use confirm_dialog::ConfirmDialog;
pub use input::TextInput;
pub use nav_bar::{NavBar, NavBarStyle};
