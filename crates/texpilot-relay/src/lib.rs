//! # texpilot Relay
//!
//! HTTP service that holds the completion-API credential so the browser never
//! sees it.
//!
//! ```text
//! GET  /health          -> {"status": "ok"}
//! POST /generate-latex  -> {"success": true, "latexCode": "..."}
//!                          {"success": false, "error": "..."}
//! ```
//!
//! Every failure, including a panic inside a handler, is turned into a JSON
//! failure response at the request boundary.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::RelayError;
pub use http::routes::create_router;
pub use server::{RelayServer, RelayServerConfig};
pub use state::RelayState;
