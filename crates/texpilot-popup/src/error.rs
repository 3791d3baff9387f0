//! Popup errors.

use thiserror::Error;

use texpilot_protocols::error::{Classify, ErrorClass, TransportError};

#[derive(Debug, Error)]
pub enum PopupError {
    #[error("Please enter a prompt")]
    EmptyPrompt,

    #[error("No active tab found")]
    NoActiveTab,

    #[error("Please open an Overleaf document first")]
    WrongSite,

    #[error("A LaTeX generation is already in progress")]
    Busy,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The page agent reported a failure; carries its message verbatim.
    #[error("{0}")]
    Agent(String),
}

impl PopupError {
    /// Text shown in the status area.
    ///
    /// A missing prompt is shown as-is; everything else is prefixed.
    pub fn status_text(&self) -> String {
        match self {
            PopupError::EmptyPrompt => self.to_string(),
            other => format!("Error: {}", other),
        }
    }
}

impl Classify for PopupError {
    fn class(&self) -> ErrorClass {
        match self {
            PopupError::EmptyPrompt | PopupError::WrongSite | PopupError::Busy => {
                ErrorClass::Validation
            }
            PopupError::NoActiveTab => ErrorClass::NotFound,
            PopupError::Transport(e) => e.class(),
            PopupError::Agent(_) => ErrorClass::Internal,
        }
    }
}
