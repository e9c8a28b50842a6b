//! TISS generation configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Official ANS location of the TISS 3.05.00 schema
pub const OFFICIAL_SCHEMA_URL: &str = "https://www.gov.br/ans/pt-br/arquivos/assuntos/prestadores-de-servicos-de-saude/tabela-unificada/downloads/tiss-3-05-00.xsd";

/// Schema location and document defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TissConfig {
    /// Directory holding the schema file
    pub schema_dir: PathBuf,
    /// File name of the schema inside `schema_dir`
    pub schema_file_name: String,
    /// Where to fetch the official schema from; `None` always synthesizes the fallback
    pub official_schema_url: Option<String>,
    /// Upper bound for the schema download
    pub fetch_timeout_secs: u64,
    /// Values for TISS fields the data model cannot supply
    pub placeholders: PlaceholderDefaults,
}

impl Default for TissConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from("schemas"),
            schema_file_name: "tiss_3.05.00.xsd".to_string(),
            official_schema_url: Some(OFFICIAL_SCHEMA_URL.to_string()),
            fetch_timeout_secs: 30,
            placeholders: PlaceholderDefaults::default(),
        }
    }
}

impl TissConfig {
    /// Config rooted at `schema_dir` with every other setting defaulted
    pub fn with_schema_dir(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            ..Default::default()
        }
    }

    /// Disables the download so provisioning goes straight to the fallback schema
    pub fn offline(mut self) -> Self {
        self.official_schema_url = None;
        self
    }

    /// Full path of the schema file
    pub fn schema_path(&self) -> PathBuf {
        self.schema_dir.join(&self.schema_file_name)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Fields of the TISS message with no counterpart in the claim data model.
///
/// The storage layer has no professional-in-claim entity, no diagnosis
/// lookup table and no beneficiary sex, so these values are filled from
/// configuration. Keeping them here makes the gap visible and overridable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlaceholderDefaults {
    /// `identificacaoGuia/senha`
    pub authorization_password: String,
    /// Days added to the service date for `identificacaoGuia/dataValidadeSenha`
    pub password_validity_days: u32,
    /// `dadosBeneficiario/sexo`; "I" is "indefinido"
    pub beneficiary_sex: String,
    /// `dadosProfissionalExecutante/conselhoProfissional`
    pub professional_council: String,
    /// `dadosProfissionalExecutante/numeroRegistroProfissional`
    pub professional_registration: String,
    /// `dadosProfissionalExecutante/ufConselho`
    pub council_state: String,
    /// `dadosProfissionalExecutante/cbos`; 225103 is a medical doctor
    pub cbos_code: String,
    /// `dadosProcedimento/descricaoProcedimento` when the claim has no description
    pub procedure_description: String,
    /// `diagnostico/descricaoDiagnostico`
    pub diagnosis_description: String,
    /// `rodape/dadosPrestador/registroANS`.
    ///
    /// Deliberately not the plan's registration number used in the header;
    /// whether the footer should reuse it is an open product question.
    pub footer_ans_registration: String,
}

impl Default for PlaceholderDefaults {
    fn default() -> Self {
        Self {
            authorization_password: "123456".to_string(),
            password_validity_days: 30,
            beneficiary_sex: "I".to_string(),
            professional_council: "CRM".to_string(),
            professional_registration: "12345".to_string(),
            council_state: "SP".to_string(),
            cbos_code: "225103".to_string(),
            procedure_description: "Procedimento médico".to_string(),
            diagnosis_description: "Diagnóstico médico".to_string(),
            footer_ans_registration: "123456".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_path_joins_dir_and_file() {
        let config = TissConfig::with_schema_dir("/tmp/tiss");
        assert_eq!(config.schema_path(), PathBuf::from("/tmp/tiss/tiss_3.05.00.xsd"));
    }

    #[test]
    fn test_offline_drops_url() {
        let config = TissConfig::default().offline();
        assert!(config.official_schema_url.is_none());
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
    }
}
