//! padron registry.
//!
//! Owns the rules that sit around RUT validation and key generation when a
//! record is written:
//!
//! 1. validate the request and normalize its RUT
//! 2. reject the write if the normalized RUT is already registered
//! 3. synthesize the company key (companies only)
//! 4. insert, with the store enforcing RUT uniqueness atomically
//!
//! Transport, authentication and pagination live outside this crate.

pub mod error;
pub mod model;
pub mod request;
pub mod service;
pub mod store;

pub use error::{FieldError, RegistryError};
pub use model::{Company, Entity, NewWorker, Worker};
pub use request::{CompanyRequest, WorkerRequest};
pub use service::Registry;
pub use store::{MemoryStore, RegistryStore, StoreError};
