//! Party Domain
//!
//! Read models for the parties a TISS claim links together:
//!
//! - **Patient**: the beneficiary receiving care, identified by CPF
//! - **Provider**: the hospital, clinic or professional billing the claim, identified by CNPJ
//! - **HealthPlan**: the operator paying the claim, identified by its ANS registration
//!
//! Records are owned by the storage layer; this crate only defines their
//! shape and the format rules the storage layer enforces on write.

pub mod patient;
pub mod provider;
pub mod health_plan;
pub mod validation;
pub mod error;

pub use patient::Patient;
pub use provider::{Provider, ProviderType};
pub use health_plan::HealthPlan;
pub use validation::{PartyValidator, ValidationResult};
pub use error::PartyError;
