//! Sesión del usuario: credenciales persistidas, estado compartido y store

pub mod credentials;
pub mod handle;
pub mod store;

pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredCredentials};
pub use handle::SessionHandle;
pub use store::AuthStore;
