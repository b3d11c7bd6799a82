//! Lead capture models: contact form submissions and quotation requests.
//! Both collections are append-only.

use crestline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A contact lead row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactLead {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// DTO for recording a contact lead.
#[derive(Debug, Clone)]
pub struct CreateContactLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// A quotation request row, including the estimate computed at submission.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuotationRequest {
    pub id: DbId,
    pub project_type: String,
    /// Square feet.
    pub area: f64,
    pub floors: i32,
    pub location: String,
    pub quality: String,
    pub estimate: f64,
    pub created_at: Timestamp,
}

/// DTO for recording a quotation request.
#[derive(Debug, Clone)]
pub struct CreateQuotationRequest {
    pub project_type: String,
    pub area: f64,
    pub floors: i32,
    pub location: String,
    pub quality: String,
    pub estimate: f64,
}
