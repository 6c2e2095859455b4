//! File content comparison strategies for mirrorsync.
//!
//! Two interchangeable [`ContentComparator`] implementations:
//!
//! - [`MetadataComparator`] compares size and modification time. It never
//!   opens the files, so it is cheap, but it trusts timestamps: a copy that
//!   did not preserve them looks changed, and an edit that kept size and
//!   mtime looks unchanged.
//! - [`DigestComparator`] streams both files through BLAKE3 and compares the
//!   digests. Exact, at the cost of reading every byte.

mod digest;
mod metadata;

pub use digest::{ContentHash, DigestComparator, hash_file};
pub use metadata::MetadataComparator;

use mirrorsync_core::{CompareStrategy, ContentComparator, FolderSettings};

/// Build the comparator selected by `strategy`.
pub fn comparator_for(
    strategy: CompareStrategy,
    settings: &FolderSettings,
    chunk_size: usize,
) -> Box<dyn ContentComparator + Send + Sync> {
    match strategy {
        CompareStrategy::Fast => Box::new(MetadataComparator::new(settings)),
        CompareStrategy::Exact => {
            Box::new(DigestComparator::new(settings).with_chunk_size(chunk_size))
        }
    }
}
