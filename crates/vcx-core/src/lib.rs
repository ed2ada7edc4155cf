//! # vcx-core: Foundational Types for the Credential Exchange
//!
//! This crate is the leaf of the workspace. It defines the primitives every
//! other crate builds on and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** All signing input flows through
//!    [`CanonicalBytes::new()`] or [`canonicalize()`]. No raw
//!    `serde_json::to_vec()` for anything that gets signed or verified.
//!
//! 2. **Newtype identifiers.** [`Did`] and [`VerificationMethodId`] are
//!    validated at construction, so a bare string cannot be passed where an
//!    owner identity is expected.
//!
//! 3. **UTC-only timestamps from an injectable clock.** [`Timestamp`] renders
//!    as `YYYY-MM-DDTHH:MM:SSZ`; builders read time through [`Clock`] so
//!    tests can pin `created` and get reproducible signatures.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vcx-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::{canonicalize, CanonicalBytes};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{Did, VerificationMethodId};
pub use temporal::{Clock, FixedClock, SystemClock, Timestamp};
