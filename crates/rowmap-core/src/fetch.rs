//! Remote content fetch collaborator

use crate::errors::ExError;

/// Fetches the bytes behind a URL
///
/// Implementations block the calling thread until the content is available
/// or the fetch fails. No timeout is imposed here.
pub trait RemoteFetcher: Send + Sync {
    /// # Errors
    ///
    /// Returns an error of kind `Fetch` when the content cannot be retrieved.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ExError>;
}
