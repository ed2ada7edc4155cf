//! # Route Modules
//!
//! One router per role:
//!
//! - `issuer`: `POST /issue`, `GET /public-key`
//! - `holder`: `POST /store`, `GET /present`, `GET /public-key`
//! - `verifier`: `GET /verify`

pub mod holder;
pub mod issuer;
pub mod verifier;
