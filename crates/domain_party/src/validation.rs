//! Party validation rules
//!
//! Format rules the storage layer enforces before a record is written.
//!
//! # Validation Rules
//!
//! ## Patients
//! - Name between 2 and 255 characters
//! - CPF in `XXX.XXX.XXX-XX` format
//! - Birth date not in the future
//! - Address at least 10 characters
//! - Email shaped like `local@domain.tld`
//!
//! ## Providers
//! - Name between 2 and 255 characters
//! - CNPJ in `XX.XXX.XXX/XXXX-XX` format
//! - Contact name is required
//!
//! ## Health Plans
//! - Name, operator code and registration number are required

use chrono::NaiveDate;

use crate::health_plan::HealthPlan;
use crate::patient::Patient;
use crate::provider::Provider;

const CPF_MASK: &str = "###.###.###-##";
const CNPJ_MASK: &str = "##.###.###/####-##";

/// Result of party validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the record is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for party records
pub struct PartyValidator;

impl PartyValidator {
    /// Validates a patient as of `today`
    pub fn validate_patient(patient: &Patient, today: NaiveDate) -> ValidationResult {
        let mut result = ValidationResult::ok();

        Self::validate_name(&patient.name, &mut result);

        if !is_valid_cpf_format(&patient.cpf) {
            result.add_error("CPF must be in format XXX.XXX.XXX-XX");
        }

        if patient.birth_date > today {
            result.add_error("Birth date cannot be in the future");
        }

        if patient.address.trim().chars().count() < 10 {
            result.add_error("Address must have at least 10 characters");
        }

        if !is_valid_email(&patient.email) {
            result.add_error(format!("Invalid email format: {}", patient.email));
        }

        if patient.phone.trim().is_empty() {
            result.add_warning("Phone number is empty");
        }

        result
    }

    /// Validates a provider
    pub fn validate_provider(provider: &Provider) -> ValidationResult {
        let mut result = ValidationResult::ok();

        Self::validate_name(&provider.name, &mut result);

        if !is_valid_cnpj_format(&provider.cnpj) {
            result.add_error("CNPJ must be in format XX.XXX.XXX/XXXX-XX");
        }

        if provider.contact.trim().is_empty() {
            result.add_error("Provider contact is required");
        }

        if let Some(ref email) = provider.email {
            if !is_valid_email(email) {
                result.add_error(format!("Invalid email format: {}", email));
            }
        }

        if !provider.active {
            result.add_warning("Provider is inactive");
        }

        result
    }

    /// Validates a health plan
    pub fn validate_health_plan(plan: &HealthPlan) -> ValidationResult {
        let mut result = ValidationResult::ok();

        Self::validate_name(&plan.name, &mut result);

        if plan.operator_code.trim().is_empty() {
            result.add_error("Operator code is required");
        }
        if plan.registration_number.trim().is_empty() {
            result.add_error("Registration number is required");
        }

        result
    }

    fn validate_name(name: &str, result: &mut ValidationResult) {
        let len = name.trim().chars().count();
        if len < 2 {
            result.add_error("Name must have at least 2 characters");
        } else if len > 255 {
            result.add_error("Name must have at most 255 characters");
        }
    }
}

/// Checks `value` against a mask where `#` is any ASCII digit and every
/// other character must match literally.
fn matches_mask(value: &str, mask: &str) -> bool {
    value.len() == mask.len()
        && value.chars().zip(mask.chars()).all(|(c, m)| match m {
            '#' => c.is_ascii_digit(),
            literal => c == literal,
        })
}

/// Returns true if `cpf` is formatted as `XXX.XXX.XXX-XX`
pub fn is_valid_cpf_format(cpf: &str) -> bool {
    matches_mask(cpf, CPF_MASK)
}

/// Returns true if `cnpj` is formatted as `XX.XXX.XXX/XXXX-XX`
pub fn is_valid_cnpj_format(cnpj: &str) -> bool {
    matches_mask(cnpj, CNPJ_MASK)
}

/// Basic `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c));
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    local_ok && host_ok && tld_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_mask() {
        assert!(is_valid_cpf_format("123.456.789-09"));
        assert!(!is_valid_cpf_format("12345678909"));
        assert!(!is_valid_cpf_format("123.456.789-0a"));
    }

    #[test]
    fn test_cnpj_mask() {
        assert!(is_valid_cnpj_format("12.345.678/0001-90"));
        assert!(!is_valid_cnpj_format("12.345.678/0001-9"));
        assert!(!is_valid_cnpj_format("12-345-678/0001-90"));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("maria.silva@example.com.br"));
        assert!(!is_valid_email("maria.silva@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("maria silva@example.com"));
    }
}
