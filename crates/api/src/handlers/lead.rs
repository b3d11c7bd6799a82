//! Handlers for the public `/leads` endpoints.
//!
//! Both endpoints are unauthenticated (they back the marketing site's forms)
//! and append-only: nothing here reads, edits, or deletes a lead.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use crestline_core::error::CoreError;
use crestline_core::quotation;
use crestline_db::models::lead::{
    ContactLead, CreateContactLead, CreateQuotationRequest, QuotationRequest,
};
use crestline_db::repositories::LeadRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /leads/contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "message is required"))]
    pub message: String,
}

/// Request body for `POST /leads/quotation`.
#[derive(Debug, Deserialize, Validate)]
pub struct QuotationRequestBody {
    #[validate(length(min = 1, message = "project_type is required"))]
    pub project_type: String,
    #[validate(range(min = 1.0, message = "area must be positive"))]
    pub area: f64,
    #[validate(range(min = 1, message = "floors must be at least 1"))]
    pub floors: i32,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "quality is required"))]
    pub quality: String,
}

/// POST /api/v1/leads/contact
pub async fn contact(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactLead>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let lead = LeadRepo::create_contact(
        &state.pool,
        &CreateContactLead {
            name: input.name,
            email: input.email,
            phone: input.phone.unwrap_or_default(),
            subject: input.subject.unwrap_or_default(),
            message: input.message,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// POST /api/v1/leads/quotation
///
/// Computes the estimate server-side from the rate table and stores it with
/// the request, so the recorded figure can never disagree with what the
/// client was shown.
pub async fn quotation(
    State(state): State<AppState>,
    Json(input): Json<QuotationRequestBody>,
) -> AppResult<(StatusCode, Json<DataResponse<QuotationRequest>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let estimate = quotation::estimate(
        &input.project_type,
        &input.quality,
        input.area,
        input.floors,
    );

    let request = LeadRepo::create_quotation(
        &state.pool,
        &CreateQuotationRequest {
            project_type: input.project_type,
            area: input.area,
            floors: input.floors,
            location: input.location,
            quality: input.quality,
            estimate,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}
