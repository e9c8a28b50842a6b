//! Healthcare provider record

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ProviderId;
use crate::error::PartyError;

/// Kind of establishment billing the claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Hospital,
    Clinic,
    Laboratory,
    ImagingCenter,
    Specialist,
    GeneralPractitioner,
    Pharmacy,
    Ambulance,
    Other,
}

impl ProviderType {
    /// Storage code for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Hospital => "hospital",
            ProviderType::Clinic => "clinic",
            ProviderType::Laboratory => "laboratory",
            ProviderType::ImagingCenter => "imaging_center",
            ProviderType::Specialist => "specialist",
            ProviderType::GeneralPractitioner => "general_practitioner",
            ProviderType::Pharmacy => "pharmacy",
            ProviderType::Ambulance => "ambulance",
            ProviderType::Other => "other",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hospital" => Ok(ProviderType::Hospital),
            "clinic" => Ok(ProviderType::Clinic),
            "laboratory" => Ok(ProviderType::Laboratory),
            "imaging_center" => Ok(ProviderType::ImagingCenter),
            "specialist" => Ok(ProviderType::Specialist),
            "general_practitioner" => Ok(ProviderType::GeneralPractitioner),
            "pharmacy" => Ok(ProviderType::Pharmacy),
            "ambulance" => Ok(ProviderType::Ambulance),
            "other" => Ok(ProviderType::Other),
            other => Err(PartyError::UnknownProviderType(other.to_string())),
        }
    }
}

/// A provider (establishment) that submits claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    /// CNPJ in `XX.XXX.XXX/XXXX-XX` format
    pub cnpj: String,
    pub provider_type: ProviderType,
    pub address: String,
    /// Contact person; stands in for the executing professional on claims
    pub contact: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub active: bool,
}
