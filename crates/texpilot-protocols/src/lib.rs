//! # texpilot Protocols
//!
//! Message contracts and collaborator traits shared by the texpilot
//! components. Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`CompletionProvider`] - Outbound text-completion API used by the relay
//! - [`RelayClient`] - The page agent's view of the relay server
//! - [`HostDocument`] - The editor page the agent reads and writes
//! - [`TabHost`] / [`TabMessenger`] - The extension messaging transport
//! - [`MessageHandler`] - A receiver registered for a tab

pub mod document;
pub mod error;
pub mod message;
pub mod provider;
pub mod relay;
pub mod transport;

pub use document::{DocumentEvent, HostDocument};
pub use error::{Classify, DomError, ErrorClass, ProviderError, RelayClientError, TransportError};
pub use message::{
    AgentRequest, GenerationRequest, GenerationResult, HealthResponse, RuntimeNotice,
};
pub use provider::{ChatMessage, ChatRole, CompletionProvider, CompletionRequest};
pub use relay::RelayClient;
pub use transport::{MessageHandler, RuntimeNotifier, TabHost, TabId, TabInfo, TabMessenger};
