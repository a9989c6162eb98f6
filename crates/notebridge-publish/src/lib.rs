//! Publishing conversion output to the notes workspace.
//!
//! The conversion pipeline in `notebridge-engine` is pure; this crate owns
//! the one place where its output crosses an I/O boundary. The workspace
//! client itself lives behind the [`NoteStore`] trait, so this crate only
//! decides what to send, in what order, and how failures are reported.

pub mod batch;
pub mod publish;
pub mod store;

pub use batch::{BlockBatches, MAX_BLOCKS_PER_REQUEST};
pub use publish::{PublishError, publish_blocks, publish_markdown};
pub use store::{CreatedPage, Destination, NoteStore, TransportError};
