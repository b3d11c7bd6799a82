//! Repository for the append-only lead collections.
//!
//! No update or delete operations exist by design; leads are a write-only
//! sink read out-of-band by the sales team.

use sqlx::PgPool;

use crate::models::lead::{
    ContactLead, CreateContactLead, CreateQuotationRequest, QuotationRequest,
};

/// Provides append operations for contact leads and quotation requests.
pub struct LeadRepo;

impl LeadRepo {
    /// Append a contact form submission.
    pub async fn create_contact(
        pool: &PgPool,
        input: &CreateContactLead,
    ) -> Result<ContactLead, sqlx::Error> {
        sqlx::query_as::<_, ContactLead>(
            "INSERT INTO contact_leads (name, email, phone, subject, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, email, phone, subject, message, created_at",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.subject)
        .bind(&input.message)
        .fetch_one(pool)
        .await
    }

    /// Append a quotation request, estimate included.
    pub async fn create_quotation(
        pool: &PgPool,
        input: &CreateQuotationRequest,
    ) -> Result<QuotationRequest, sqlx::Error> {
        sqlx::query_as::<_, QuotationRequest>(
            "INSERT INTO quotation_requests (project_type, area, floors, location, quality, estimate)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, project_type, area, floors, location, quality, estimate, created_at",
        )
        .bind(&input.project_type)
        .bind(input.area)
        .bind(input.floors)
        .bind(&input.location)
        .bind(&input.quality)
        .bind(input.estimate)
        .fetch_one(pool)
        .await
    }
}
