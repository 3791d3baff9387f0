//! # texpilot Popup
//!
//! The popup takes a prompt from the user, makes sure the active tab is an
//! editor page, hands the prompt to the page agent in that tab (loading the
//! agent first if it is not there yet) and reports the outcome as a short
//! lived status message.

mod controller;
mod error;
mod site;
mod status;

pub use controller::{PopupController, PopupState};
pub use error::PopupError;
pub use site::is_host_site;
pub use status::{StatusBoard, StatusKind, StatusMessage, StatusSink};
