//! Read-layer cache.
//!
//! Every content read is keyed by its operation plus all effective parameters
//! and tagged with coarse invalidation tags. Admin writes invalidate by tag;
//! a fixed TTL bounds staleness regardless of invalidation.
//!
//! ```toml
//! [cache]
//! enabled = true
//! capacity = 1024
//! ttl_seconds = 3600
//! ```

mod keys;
mod lock;
mod store;

pub use keys::{CacheKey, CacheTag};
pub use store::{CacheConfig, ContentCache};
