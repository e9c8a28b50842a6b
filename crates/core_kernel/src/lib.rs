//! Core Kernel - Foundational types for the TISS claims system
//!
//! This crate provides the building blocks shared by every domain module:
//! - Typed entity identifiers backed by the storage layer's integer keys
//! - Port infrastructure for the hexagonal (ports and adapters) layout,
//!   including the error type every adapter reports through

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClaimId, PatientId, ProviderId, HealthPlanId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
