//! # padron-rut
//!
//! Parsing and normalization of RUTs (Rol Único Tributario), the national
//! identifier carried by every company and worker in the registry.
//!
//! ## Accepted Input
//!
//! A RUT is a numeric root followed by a hyphen and a single check
//! character. Thousands separators are optional:
//!
//! - `15722520-0`
//! - `15.722.520-0`
//! - `6-k`
//!
//! ## Normalized Form
//!
//! Validation yields a [`Rut`] whose canonical text drops the dots and the
//! hyphen and uppercases the check character (`157225200`, `6K`). That is the
//! form stored and compared for uniqueness.
//!
//! Validation is total: every input either produces a [`Rut`] or an
//! [`InvalidFormat`], whose message is always `Invalid Rut`.

mod check_digit;
mod error;
mod rut;

pub use check_digit::CheckDigit;
pub use error::{InvalidFormat, Rejection};
pub use rut::{is_valid, Rut};
