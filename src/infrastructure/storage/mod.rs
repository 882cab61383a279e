//! Token storage adapters.

mod file_storage;
#[cfg(feature = "keyring")]
mod keyring_storage;
#[cfg(not(feature = "keyring"))]
mod keyring_storage_stub;

use std::sync::Arc;

use tracing::{info, warn};

pub use file_storage::FileTokenStorage;
#[cfg(feature = "keyring")]
pub use keyring_storage::KeyringTokenStorage;
#[cfg(not(feature = "keyring"))]
pub use keyring_storage_stub::KeyringTokenStorage;

use crate::domain::ports::TokenStoragePort;
use crate::infrastructure::config::TokenStorageKind;

/// Keyring service name.
pub const TOKEN_SERVICE: &str = "workshops";
/// Name of the single key holding the credential.
pub const TOKEN_KEY: &str = "customerToken";

/// Builds the configured storage backend.
///
/// Falls back to the keyring adapter when the data directory for file storage
/// cannot be determined.
#[must_use]
pub fn token_storage(kind: TokenStorageKind) -> Arc<dyn TokenStoragePort> {
    match kind {
        TokenStorageKind::Keyring => {
            info!("Using keyring token storage");
            Arc::new(KeyringTokenStorage::new())
        }
        TokenStorageKind::File => match FileTokenStorage::new() {
            Ok(storage) => {
                info!(path = %storage.path().display(), "Using file token storage");
                Arc::new(storage)
            }
            Err(e) => {
                warn!(error = %e, "File token storage unavailable, using keyring");
                Arc::new(KeyringTokenStorage::new())
            }
        },
    }
}
