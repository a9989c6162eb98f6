//! Ordered create/append orchestration.

use notebridge_engine::{OutputBlock, convert_markdown};

use crate::batch::BlockBatches;
use crate::store::{CreatedPage, Destination, NoteStore, TransportError};

/// How publishing a document failed.
///
/// `Append` carries the already-created page: a failed append does not undo
/// the create, and the caller sees the partial success instead of losing it.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("no destination available; a parent page or database must be chosen")]
    UnresolvedDestination,
    #[error("page creation failed")]
    Create(#[source] TransportError),
    #[error("append batch {batch} of {total} failed for page {}", .page.id)]
    Append {
        page: CreatedPage,
        batch: usize,
        total: usize,
        #[source]
        source: TransportError,
    },
}

/// Convert markdown and publish it as a new page.
pub fn publish_markdown<S: NoteStore>(
    store: &mut S,
    title: &str,
    markdown: &str,
    destination: Option<Destination>,
) -> Result<CreatedPage, PublishError> {
    publish_blocks(store, title, convert_markdown(markdown), destination)
}

/// Publish an already-converted block sequence as a new page.
///
/// The create call carries the first batch; remaining batches are appended
/// strictly in order, addressed by the id the create call returned. Nothing
/// is appended when the create fails, and no call is ever retried here.
pub fn publish_blocks<S: NoteStore>(
    store: &mut S,
    title: &str,
    blocks: Vec<OutputBlock>,
    destination: Option<Destination>,
) -> Result<CreatedPage, PublishError> {
    let destination = resolve_destination(store, destination)?;
    let batches = BlockBatches::split(blocks);
    log::debug!(
        "publishing {title:?}: {} blocks in {} call(s)",
        batches.total_blocks(),
        1 + batches.appends().len(),
    );

    let page = store
        .create_page(&destination, title, batches.initial())
        .map_err(PublishError::Create)?;

    let total = batches.appends().len();
    for (i, chunk) in batches.appends().iter().enumerate() {
        store
            .append_blocks(&page.id, chunk)
            .map_err(|source| PublishError::Append {
                page: page.clone(),
                batch: i + 1,
                total,
                source,
            })?;
    }

    Ok(page)
}

/// An explicit destination wins; otherwise ask the store for its default.
/// A lookup failure degrades to the same user-actionable error as an absent
/// default.
fn resolve_destination<S: NoteStore>(
    store: &mut S,
    explicit: Option<Destination>,
) -> Result<Destination, PublishError> {
    if let Some(destination) = explicit {
        return Ok(destination);
    }
    match store.default_destination() {
        Ok(Some(destination)) => Ok(destination),
        Ok(None) => Err(PublishError::UnresolvedDestination),
        Err(err) => {
            log::warn!("default destination lookup failed: {err}");
            Err(PublishError::UnresolvedDestination)
        }
    }
}
