//! Error types shared across the app.

use thiserror::Error;

/// Failures of the graph data store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	#[error("node not found: {0}")]
	NodeNotFound(String),
}

/// Failures talking to the chat backend.
///
/// Both variants render the same fallback text to the user; the detail only
/// reaches the console log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
	#[error("chat backend is not initialized: no API key configured")]
	NotInitialized,

	#[error("chat backend unavailable: {0}")]
	BackendUnavailable(String),
}

#[derive(Error, Debug)]
pub enum FixtureError {
	#[error("failed to parse graph fixture: {0}")]
	Parse(#[from] serde_json::Error),
}
