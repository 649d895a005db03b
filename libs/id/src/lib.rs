//! # padron-id
//!
//! Identifiers for registry records.
//!
//! ## Company Keys
//!
//! Companies are keyed by a [`CompanyKey`] synthesized at creation time rather
//! than a database sequence: up to three leading characters of the company
//! name followed by the creation instant at millisecond resolution.
//!
//! ```text
//! {prefix}{YYYYMMDDHHMMSSmmm}
//! pre20240110223344422
//! ```
//!
//! The timestamp is fixed width, so two keys can only collide when they share
//! a prefix and were generated within the same millisecond. The generator does
//! not check for collisions; the registry owns uniqueness.
//!
//! ## Worker Ids
//!
//! Workers use a plain positive integer ([`WorkerId`]) assigned by the store.

mod clock;
mod error;
mod key;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::IdError;
pub use key::{CompanyKey, KeyGenerator};
pub use types::WorkerId;
