//! Integration tests for the mirrored in-memory filesystem

mod dual_write;
mod listing;
mod operations;
mod properties;

use mirrorfs::journal::JournalConfig;
use mirrorfs::MirrorFs;

/// Fresh filesystem without the journal file, so listings show only what a
/// test created.
pub fn bare_fs() -> MirrorFs {
    MirrorFs::new(&JournalConfig {
        enabled: false,
        ..JournalConfig::default()
    })
}
