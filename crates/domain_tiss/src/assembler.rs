//! Document Assembler
//!
//! Fills the fixed TISS 3.05.00 element tree for one claim. The mapping is a
//! template fill: element order is dictated by the schema and nothing
//! branches on data content beyond defaulting missing optional fields.
//!
//! ```text
//! mensagemTISS (xmlns:ans, version)
//! ├── cabecalho
//! │   ├── identificacaoOperadora (codigoOperadora, registroANS)
//! │   ├── dadosPrestador (cnpjPrestador, registroANS)
//! │   ├── dataProcessamento
//! │   └── numeroProtocolo
//! ├── corpo
//! │   └── dadosGuia
//! │       ├── identificacaoGuia
//! │       ├── dadosBeneficiario
//! │       ├── dadosPrestador
//! │       ├── dadosProfissionalExecutante
//! │       ├── dadosProcedimento
//! │       ├── diagnostico
//! │       └── valoresInformados
//! └── rodape
//!     ├── dadosPrestador (cnpjPrestador, registroANS)
//!     ├── dataProcessamento
//!     └── valorTotalGeral
//! ```

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{ClaimId, HealthPlanId, PatientId, ProviderId};
use domain_claims::Claim;
use domain_party::{HealthPlan, Patient, Provider};

use crate::config::PlaceholderDefaults;
use crate::document::{TissDocument, XmlElement};
use crate::error::TissError;
use crate::ports::ClaimsDataPort;

/// Date format for every `xs:date` field
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A claim with the three records it references, fetched for one generation
#[derive(Debug, Clone)]
pub struct ClaimBundle {
    pub claim: Claim,
    pub patient: Patient,
    pub provider: Provider,
    pub health_plan: HealthPlan,
}

/// Builds TISS documents from claims resolved through a [`ClaimsDataPort`]
#[derive(Clone)]
pub struct DocumentAssembler {
    port: Arc<dyn ClaimsDataPort>,
    placeholders: PlaceholderDefaults,
}

impl DocumentAssembler {
    pub fn new(port: Arc<dyn ClaimsDataPort>, placeholders: PlaceholderDefaults) -> Self {
        Self { port, placeholders }
    }

    pub fn placeholders(&self) -> &PlaceholderDefaults {
        &self.placeholders
    }

    /// Fetches the claim and its patient, provider and health plan
    ///
    /// # Errors
    ///
    /// `TissError::NotFound` naming the first record that does not resolve,
    /// `TissError::DataAccess` if the store itself fails
    pub async fn fetch_bundle(&self, claim_id: ClaimId) -> Result<ClaimBundle, TissError> {
        let claim = self
            .port
            .find_claim(claim_id)
            .await?
            .ok_or_else(|| TissError::not_found(ClaimId::entity_name(), claim_id))?;

        let patient = self
            .port
            .find_patient(claim.patient_id)
            .await?
            .ok_or_else(|| TissError::not_found(PatientId::entity_name(), claim.patient_id))?;

        let provider = self
            .port
            .find_provider(claim.provider_id)
            .await?
            .ok_or_else(|| TissError::not_found(ProviderId::entity_name(), claim.provider_id))?;

        let health_plan = self
            .port
            .find_health_plan(claim.plan_id)
            .await?
            .ok_or_else(|| TissError::not_found(HealthPlanId::entity_name(), claim.plan_id))?;

        Ok(ClaimBundle {
            claim,
            patient,
            provider,
            health_plan,
        })
    }

    /// Generates the TISS XML for a claim, stamped with today's date
    pub async fn generate(&self, claim_id: ClaimId) -> Result<String, TissError> {
        self.generate_on(claim_id, Utc::now().date_naive()).await
    }

    /// Generates the TISS XML for a claim with an explicit processing date
    pub async fn generate_on(
        &self,
        claim_id: ClaimId,
        processing_date: NaiveDate,
    ) -> Result<String, TissError> {
        let bundle = self.fetch_bundle(claim_id).await?;
        let xml = self.build_document(&bundle, processing_date).to_xml_string()?;
        debug!(claim_id = %claim_id, bytes = xml.len(), "TISS document assembled");
        Ok(xml)
    }

    /// Fills the element tree from already-fetched records
    pub fn build_document(&self, bundle: &ClaimBundle, processing_date: NaiveDate) -> TissDocument {
        TissDocument::new(
            self.header(bundle, processing_date),
            self.body(bundle),
            self.footer(bundle, processing_date),
        )
    }

    fn header(&self, bundle: &ClaimBundle, processing_date: NaiveDate) -> XmlElement {
        let plan = &bundle.health_plan;
        XmlElement::branch(
            "cabecalho",
            vec![
                XmlElement::branch(
                    "identificacaoOperadora",
                    vec![
                        XmlElement::leaf("codigoOperadora", &plan.operator_code),
                        XmlElement::leaf("registroANS", &plan.registration_number),
                    ],
                ),
                XmlElement::branch(
                    "dadosPrestador",
                    vec![
                        XmlElement::leaf("cnpjPrestador", &bundle.provider.cnpj),
                        XmlElement::leaf("registroANS", &plan.registration_number),
                    ],
                ),
                XmlElement::leaf("dataProcessamento", format_date(processing_date)),
                XmlElement::leaf("numeroProtocolo", bundle.claim.id.to_string()),
            ],
        )
    }

    fn body(&self, bundle: &ClaimBundle) -> XmlElement {
        let guide = XmlElement::branch(
            "dadosGuia",
            vec![
                self.guide_identification(&bundle.claim),
                self.beneficiary(&bundle.patient),
                provider_data(&bundle.provider),
                self.executing_professional(&bundle.provider),
                self.procedure(&bundle.claim),
                self.diagnosis(&bundle.claim),
                declared_values(&bundle.claim),
            ],
        );
        XmlElement::branch("corpo", vec![guide])
    }

    fn guide_identification(&self, claim: &Claim) -> XmlElement {
        let expiry = password_expiry(claim.claim_date, self.placeholders.password_validity_days);

        XmlElement::branch(
            "identificacaoGuia",
            vec![
                XmlElement::leaf("numeroGuiaPrestador", claim.id.to_string()),
                XmlElement::leaf("numeroGuiaOperadora", claim.id.to_string()),
                XmlElement::leaf("dataAutorizacao", format_date(claim.claim_date)),
                XmlElement::leaf("senha", &self.placeholders.authorization_password),
                XmlElement::leaf("dataValidadeSenha", format_date(expiry)),
            ],
        )
    }

    fn beneficiary(&self, patient: &Patient) -> XmlElement {
        XmlElement::branch(
            "dadosBeneficiario",
            vec![
                XmlElement::leaf("numeroCarteira", patient.id.to_string()),
                XmlElement::leaf("nomeBeneficiario", &patient.name),
                XmlElement::leaf("dataNascimento", format_date(patient.birth_date)),
                XmlElement::leaf("sexo", &self.placeholders.beneficiary_sex),
                XmlElement::leaf("cpf", &patient.cpf),
            ],
        )
    }

    // The provider's contact person stands in for the executing professional.
    fn executing_professional(&self, provider: &Provider) -> XmlElement {
        let p = &self.placeholders;
        XmlElement::branch(
            "dadosProfissionalExecutante",
            vec![
                XmlElement::leaf("nomeProfissional", &provider.contact),
                XmlElement::leaf("conselhoProfissional", &p.professional_council),
                XmlElement::leaf("numeroRegistroProfissional", &p.professional_registration),
                XmlElement::leaf("ufConselho", &p.council_state),
                XmlElement::leaf("cbos", &p.cbos_code),
            ],
        )
    }

    fn procedure(&self, claim: &Claim) -> XmlElement {
        let description = claim
            .description
            .as_deref()
            .unwrap_or(&self.placeholders.procedure_description);

        XmlElement::branch(
            "dadosProcedimento",
            vec![
                XmlElement::leaf(
                    "codigoProcedimento",
                    claim.procedure_code.as_deref().unwrap_or_default(),
                ),
                XmlElement::leaf("descricaoProcedimento", description),
                XmlElement::leaf("dataProcedimento", format_date(claim.claim_date)),
                XmlElement::leaf("valorProcedimento", format_value(claim.value)),
            ],
        )
    }

    fn diagnosis(&self, claim: &Claim) -> XmlElement {
        XmlElement::branch(
            "diagnostico",
            vec![
                XmlElement::leaf(
                    "codigoDiagnostico",
                    claim.diagnosis_code.as_deref().unwrap_or_default(),
                ),
                XmlElement::leaf("descricaoDiagnostico", &self.placeholders.diagnosis_description),
            ],
        )
    }

    fn footer(&self, bundle: &ClaimBundle, processing_date: NaiveDate) -> XmlElement {
        XmlElement::branch(
            "rodape",
            vec![
                XmlElement::branch(
                    "dadosPrestador",
                    vec![
                        XmlElement::leaf("cnpjPrestador", &bundle.provider.cnpj),
                        XmlElement::leaf("registroANS", &self.placeholders.footer_ans_registration),
                    ],
                ),
                XmlElement::leaf("dataProcessamento", format_date(processing_date)),
                XmlElement::leaf("valorTotalGeral", format_value(bundle.claim.value)),
            ],
        )
    }
}

fn provider_data(provider: &Provider) -> XmlElement {
    XmlElement::branch(
        "dadosPrestador",
        vec![
            XmlElement::leaf("cnpjPrestador", &provider.cnpj),
            XmlElement::leaf("nomePrestador", &provider.name),
            XmlElement::leaf("enderecoPrestador", &provider.address),
        ],
    )
}

// Single-procedure claims: both totals equal the claim value.
fn declared_values(claim: &Claim) -> XmlElement {
    XmlElement::branch(
        "valoresInformados",
        vec![
            XmlElement::leaf("valorTotalGeral", format_value(claim.value)),
            XmlElement::leaf("valorTotalProcedimentos", format_value(claim.value)),
        ],
    )
}

/// Service date plus the validity window, capped at 9999-12-31 so the
/// result still fits `xs:date`'s four-digit year
pub fn password_expiry(service_date: NaiveDate, validity_days: u32) -> NaiveDate {
    let latest = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX);
    service_date
        .checked_add_days(Days::new(u64::from(validity_days)))
        .map_or(latest, |expiry| expiry.min(latest))
}

/// `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Fixed-point with exactly two decimals
pub fn format_value(value: Decimal) -> String {
    format!("{:.2}", value)
}
