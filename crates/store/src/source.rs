//! The seam between the store and whatever actually holds the users dataset.

use derive_more::{Debug, Display, Error};

use crate::user::User;

/// Error type for dataset source operations.
#[derive(Debug, Display, Error)]
#[display("source error: {_0}")]
#[error(ignore)]
pub struct SourceError(pub String);

/// A backing store that can produce the full users dataset.
///
/// `load_all` is the expensive bulk fetch the snapshot cache guards; the
/// store calls it at most once per TTL window per source.
pub trait UserSource: Send + Sync + 'static {
    /// Source identifier, used as the cache key and in logs.
    fn name(&self) -> &str;

    /// Load every user record from the backing store.
    fn load_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<User>, SourceError>> + Send;
}
