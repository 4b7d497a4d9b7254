//! # Ports Layer
//!
//! Defines the port traits for the Vote Intake subsystem.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (API exposed to the transport boundary)
//! - `outbound.rs` - Driven ports (dependencies required by the service)

pub mod inbound;
pub mod outbound;
