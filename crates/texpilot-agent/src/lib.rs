//! # texpilot Agent
//!
//! The page agent runs inside the editor page. It remembers where the caret
//! last was, and on a `generateLatex` request it waits for the editor, checks
//! the relay, asks it for LaTeX and inserts the result at that caret.
//!
//! The page itself is reached through [`HostDocument`]; [`MemoryDocument`] is
//! an in-process implementation used to drive the agent without a browser.
//!
//! [`HostDocument`]: texpilot_protocols::HostDocument

mod agent;
mod caret;
mod client;
mod document;
mod error;
mod wait;

pub use agent::PageAgent;
pub use caret::{CaretSnapshot, CaretTracker};
pub use client::HttpRelayClient;
pub use document::{MemoryDocument, TextRange};
pub use error::AgentError;
pub use wait::{WaitError, wait_for_element};
