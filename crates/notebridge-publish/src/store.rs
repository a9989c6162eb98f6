//! The transport collaborator boundary.
//!
//! The actual workspace API client (HTTP, auth, its own timeout and retry
//! policy) implements [`NoteStore`]; this crate never retries and surfaces
//! its failures verbatim.

use notebridge_engine::OutputBlock;
use serde::{Deserialize, Serialize};

/// Where a created page is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    Page(String),
    Database(String),
}

/// Identity of a successfully created page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPage {
    pub id: String,
    pub url: String,
}

/// A failed transport call, as the collaborator reported it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("authorization rejected: {0}")]
    Auth(String),
    #[error("rate limit exceeded: {0}")]
    Quota(String),
}

/// Operations the notes-workspace client provides.
///
/// Calls for one document are strictly ordered: the create call returns the
/// page id the append calls are addressed to.
pub trait NoteStore {
    /// The destination to use when the caller supplied none; `Ok(None)`
    /// means the account has no reachable default location.
    fn default_destination(&mut self) -> Result<Option<Destination>, TransportError>;

    fn create_page(
        &mut self,
        destination: &Destination,
        title: &str,
        blocks: &[OutputBlock],
    ) -> Result<CreatedPage, TransportError>;

    fn append_blocks(
        &mut self,
        page_id: &str,
        blocks: &[OutputBlock],
    ) -> Result<(), TransportError>;
}
