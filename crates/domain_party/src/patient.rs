//! Patient (beneficiary) record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::PatientId;

/// A patient covered by a health plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Storage key, doubles as the beneficiary card number
    pub id: PatientId,
    /// Full name
    pub name: String,
    /// CPF in `XXX.XXX.XXX-XX` format
    pub cpf: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Postal address
    pub address: String,
    /// Contact phone
    pub phone: String,
    /// Contact email
    pub email: String,
}

impl Patient {
    /// Age in whole years on the given date
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        date.years_since(self.birth_date).unwrap_or(0)
    }
}
