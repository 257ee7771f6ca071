//! # opus8 Store
//!
//! Content store client for opus8: publishing and fetching immutable
//! declaration bytes with retry/backoff, existence probing, and
//! best-effort pinning.
//!
//! The store is an opaque blob service addressed by content hash. The
//! [`ContentStore`] trait abstracts it; [`HttpStore`] talks to a REST
//! gateway, [`MemoryStore`] backs tests.

pub mod error;
pub mod http;
pub mod memory;
pub mod retry;
pub mod traits;

pub use error::{Result, StoreError};
pub use http::{HttpStore, StoreConfig};
pub use memory::MemoryStore;
pub use retry::{with_retry, RetryPolicy};
pub use traits::{ContentStore, ContentStoreExt};
