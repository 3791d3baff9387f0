//! Error types for the texpilot protocol layer.

mod class;
mod dom;
mod provider;
mod relay_client;
mod transport;

pub use class::*;
pub use dom::*;
pub use provider::*;
pub use relay_client::*;
pub use transport::*;
