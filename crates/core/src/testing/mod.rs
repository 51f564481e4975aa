//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelmark_core::testing::MockBookmarkSource;
//!
//! let source = MockBookmarkSource::new();
//! source.add_bookmark("3").await;
//! source.set_next_error(SyncError::Timeout).await;
//! ```

mod mock_bookmark_source;

pub use mock_bookmark_source::{MockBookmarkSource, RecordedCall};
