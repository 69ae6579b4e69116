//! # Domain Layer
//!
//! Pure typed-data and signature logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod chains;
pub mod coordinates;
pub mod ecdsa;
pub mod eip712;
pub mod entities;
pub mod errors;
