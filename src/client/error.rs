//! Client-side error classes.
//!
//! `Display` output is the message shown to the user.

use thiserror::Error;

use crate::models::GenerationResult;

pub const GENERIC_FAILURE: &str = "The request failed. Please try again later.";

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The connectivity probe reported offline; no request was made.
    #[error("You are not connected to the internet. Check your network and try again.")]
    Offline,
    /// Identity is still being resolved, so the target store is unknown.
    #[error("Still checking your sign-in status. Please try again in a moment.")]
    SessionResolving,
    /// The request never produced an HTTP response.
    #[error("Could not reach the server. Check your network and try again.")]
    Network { cause: String },
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Service { status: u16, message: String },
    /// Generation succeeded but the server could not record it.
    #[error("{message}")]
    HistorySaveFailed {
        message: String,
        result: Box<GenerationResult>,
    },
    /// The configured server address cannot be used as a base URL.
    #[error("The server address is not valid.")]
    InvalidBaseUrl(String),
    /// The server answered 2xx with a body we could not decode.
    #[error("Received an unexpected response from the server. Please try again later.")]
    Decode(String),
}

impl ClientError {
    pub fn is_offline(&self) -> bool {
        matches!(self, ClientError::Offline)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Offline | ClientError::Network { .. })
    }
}
