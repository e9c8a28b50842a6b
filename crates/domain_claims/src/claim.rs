//! Claim record

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, HealthPlanId, PatientId, ProviderId};
use crate::error::ClaimError;

/// Minimum length of a procedure or diagnosis code
const MIN_CODE_LEN: usize = 3;
/// Maximum length of a procedure or diagnosis code
const MAX_CODE_LEN: usize = 20;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Submitted, awaiting decision
    Pending,
    /// Approved for payment
    Approved,
    /// Denied
    Denied,
    /// Paid
    Paid,
}

impl ClaimStatus {
    /// Storage code for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Denied => "denied",
            ClaimStatus::Paid => "paid",
        }
    }

    /// Checks if moving from `self` to `target` is allowed
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self, target),
            (Pending, Approved) | (Pending, Denied) | (Approved, Paid)
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "denied" => Ok(ClaimStatus::Denied),
            "paid" => Ok(ClaimStatus::Paid),
            other => Err(ClaimError::UnknownStatus(other.to_string())),
        }
    }
}

/// A healthcare claim for a single procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Storage key, doubles as the TISS protocol and guide numbers
    pub id: ClaimId,
    pub patient_id: PatientId,
    pub provider_id: ProviderId,
    pub plan_id: HealthPlanId,
    /// TUSS procedure code
    pub procedure_code: Option<String>,
    /// ICD diagnosis code
    pub diagnosis_code: Option<String>,
    /// Date the service was provided
    pub claim_date: NaiveDate,
    /// Billed value, two decimal places
    pub value: Decimal,
    pub description: Option<String>,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a claim
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub patient_id: PatientId,
    pub provider_id: ProviderId,
    pub plan_id: HealthPlanId,
    pub procedure_code: Option<String>,
    pub diagnosis_code: Option<String>,
    pub claim_date: NaiveDate,
    pub value: Decimal,
    pub description: Option<String>,
}

impl Claim {
    /// Registers a pending claim under the given storage key
    ///
    /// Enforces the write-time invariants: value strictly positive and
    /// codes of at least three upper-case alphanumerics or dashes.
    pub fn register(id: ClaimId, new: NewClaim) -> Result<Self, ClaimError> {
        if new.value <= Decimal::ZERO {
            return Err(ClaimError::NonPositiveValue(new.value));
        }
        if let Some(ref code) = new.procedure_code {
            validate_code("procedure code", code)?;
        }
        if let Some(ref code) = new.diagnosis_code {
            validate_code("diagnosis code", code)?;
        }

        let now = Utc::now();
        Ok(Self {
            id,
            patient_id: new.patient_id,
            provider_id: new.provider_id,
            plan_id: new.plan_id,
            procedure_code: new.procedure_code,
            diagnosis_code: new.diagnosis_code,
            claim_date: new.claim_date,
            value: new.value.round_dp(2),
            description: new.description,
            status: ClaimStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates the status
    pub fn update_status(&mut self, status: ClaimStatus) -> Result<(), ClaimError> {
        if !self.status.can_transition_to(status) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        tracing::debug!(
            claim_id = %self.id,
            from = %self.status,
            to = %status,
            "Claim status changed"
        );
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Approves a pending claim
    pub fn approve(&mut self) -> Result<(), ClaimError> {
        self.update_status(ClaimStatus::Approved)
    }

    /// Denies a pending claim
    pub fn deny(&mut self) -> Result<(), ClaimError> {
        self.update_status(ClaimStatus::Denied)
    }

    /// Marks an approved claim as paid
    pub fn mark_as_paid(&mut self) -> Result<(), ClaimError> {
        self.update_status(ClaimStatus::Paid)
    }

    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.status, ClaimStatus::Denied | ClaimStatus::Paid)
    }
}

fn validate_code(field: &'static str, code: &str) -> Result<(), ClaimError> {
    if code.len() < MIN_CODE_LEN || code.len() > MAX_CODE_LEN {
        return Err(ClaimError::InvalidCode {
            field,
            reason: format!("length must be between {MIN_CODE_LEN} and {MAX_CODE_LEN}"),
        });
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ClaimError::InvalidCode {
            field,
            reason: format!("'{code}' may only contain A-Z, 0-9 and '-'"),
        });
    }
    Ok(())
}
