//! Lookups for the records a TISS guide is built from
//!
//! One query per table, keyed by primary key. Rows come back exactly as
//! stored; turning them into domain records is the adapter's job.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::error::DatabaseError;

/// A row of the `claims` table
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub patient_id: i64,
    pub provider_id: i64,
    pub health_plan_id: i64,
    pub procedure_code: Option<String>,
    pub diagnosis_code: Option<String>,
    pub claim_date: NaiveDate,
    pub value: Decimal,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `patients` table
#[derive(Debug, Clone, FromRow)]
pub struct PatientRow {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// A row of the `providers` table
#[derive(Debug, Clone, FromRow)]
pub struct ProviderRow {
    pub id: i64,
    pub name: String,
    pub cnpj: String,
    pub provider_type: String,
    pub address: String,
    pub contact: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub active: bool,
}

/// A row of the `health_plans` table
#[derive(Debug, Clone, FromRow)]
pub struct HealthPlanRow {
    pub id: i64,
    pub name: String,
    pub operator_code: String,
    pub registration_number: String,
    pub description: Option<String>,
    pub active: bool,
}

/// Read-only access to the four tables
#[derive(Debug, Clone)]
pub struct TissRecordsRepository {
    pool: PgPool,
}

impl TissRecordsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn find_claim(&self, id: i64) -> Result<Option<ClaimRow>, DatabaseError> {
        debug!(claim_id = id, "Loading claim row");
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT
                id,
                patient_id,
                provider_id,
                health_plan_id,
                procedure_code,
                diagnosis_code,
                claim_date,
                value,
                description,
                status,
                created_at,
                updated_at
            FROM claims
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_patient(&self, id: i64) -> Result<Option<PatientRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PatientRow>(
            r#"
            SELECT id, name, cpf, birth_date, address, phone, email
            FROM patients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_provider(&self, id: i64) -> Result<Option<ProviderRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ProviderRow>(
            r#"
            SELECT id, name, cnpj, provider_type, address, contact, phone, email, website, active
            FROM providers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_health_plan(&self, id: i64) -> Result<Option<HealthPlanRow>, DatabaseError> {
        let row = sqlx::query_as::<_, HealthPlanRow>(
            r#"
            SELECT id, name, operator_code, registration_number, description, active
            FROM health_plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
