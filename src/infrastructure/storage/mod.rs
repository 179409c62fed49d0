//! Session storage adapters.

#[cfg(feature = "keyring")]
mod keyring_storage;
#[cfg(not(feature = "keyring"))]
mod keyring_storage_stub;
#[cfg(any(feature = "keyring", test))]
mod session_record;

#[cfg(feature = "keyring")]
pub use keyring_storage::KeyringSessionStorage;
#[cfg(not(feature = "keyring"))]
pub use keyring_storage_stub::KeyringSessionStorage;
