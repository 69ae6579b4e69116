//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that callers use to issue and check vouchers
//! - **Outbound (Driven)**: The Signer capability this subsystem needs

pub mod inbound;
pub mod outbound;
