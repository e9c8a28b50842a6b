//! Health plan (operator) record

use serde::{Deserialize, Serialize};

use core_kernel::HealthPlanId;

/// A health plan operated by an ANS-registered operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPlan {
    pub id: HealthPlanId,
    pub name: String,
    /// Operator code as issued by the operator itself
    pub operator_code: String,
    /// ANS registration number, unique per plan
    pub registration_number: String,
    pub description: Option<String>,
    pub active: bool,
}
