//! Relay client protocol.

use async_trait::async_trait;

use crate::error::RelayClientError;
use crate::message::GenerationResult;

/// The page agent's view of the relay server.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Reachability probe. `Ok` only for a successful response.
    async fn health_check(&self) -> Result<(), RelayClientError>;

    /// Ask the relay to generate LaTeX for `prompt`.
    ///
    /// A 2xx reply is decoded as-is; a non-2xx reply becomes
    /// [`RelayClientError::Status`] carrying the relay's error text.
    async fn generate(&self, prompt: &str) -> Result<GenerationResult, RelayClientError>;
}
