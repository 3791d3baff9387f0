//! HTTP interface module.
//!
//! - `GET /health`: reachability probe
//! - `POST /generate-latex`: prompt to LaTeX

pub mod handlers;
pub mod routes;
