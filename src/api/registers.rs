//! Register (equipment loan) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::register::{CreateRegister, RegisterDetails, UpdateRegister},
    AppState,
};

use super::ValidatedJson;

/// `(student_id, register_id)` path segments
type RegisterPath = WithRejection<Path<(i32, i32)>, AppError>;

/// Identifier of a created register
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i32,
}

/// Confirmation message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// Routes of the register collection
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_registers)
                .post(create_register)
                .delete(delete_all_registers),
        )
        .route(
            "/:student_id/:register_id",
            get(get_register)
                .put(update_register)
                .delete(delete_register),
        )
}

/// Record a new loan
#[utoipa::path(
    post,
    path = "/registers",
    tag = "registers",
    request_body = CreateRegister,
    responses(
        (status = 201, description = "Register created", body = CreatedResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_register(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateRegister>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state.services.registers.create(data).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// List every register with its student and equipment
#[utoipa::path(
    get,
    path = "/registers",
    tag = "registers",
    responses(
        (status = 200, description = "All registers", body = Vec<RegisterDetails>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_registers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RegisterDetails>>> {
    let rows = state.services.registers.list().await?;
    Ok(Json(rows))
}

/// Get one register of a student.
///
/// The row is returned inside a one-element array.
#[utoipa::path(
    get,
    path = "/registers/{student_id}/{register_id}",
    tag = "registers",
    params(
        ("student_id" = i32, Path, description = "Student ID"),
        ("register_id" = i32, Path, description = "Register ID")
    ),
    responses(
        (status = 200, description = "Matching register", body = Vec<RegisterDetails>),
        (status = 404, description = "No such register for this student", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_register(
    State(state): State<AppState>,
    WithRejection(Path((student_id, register_id)), _): RegisterPath,
) -> AppResult<Json<Vec<RegisterDetails>>> {
    let row = state.services.registers.get(student_id, register_id).await?;
    Ok(Json(vec![row]))
}

/// Replace a register
#[utoipa::path(
    put,
    path = "/registers/{student_id}/{register_id}",
    tag = "registers",
    params(
        ("student_id" = i32, Path, description = "Student ID"),
        ("register_id" = i32, Path, description = "Register ID")
    ),
    request_body = UpdateRegister,
    responses(
        (status = 200, description = "Register updated", body = MessageResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "No such register for this student", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_register(
    State(state): State<AppState>,
    WithRejection(Path((student_id, register_id)), _): RegisterPath,
    ValidatedJson(data): ValidatedJson<UpdateRegister>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .registers
        .update(student_id, register_id, data)
        .await?;
    Ok(MessageResponse::new("Register updated successfully"))
}

/// Delete a register
#[utoipa::path(
    delete,
    path = "/registers/{student_id}/{register_id}",
    tag = "registers",
    params(
        ("student_id" = i32, Path, description = "Student ID"),
        ("register_id" = i32, Path, description = "Register ID")
    ),
    responses(
        (status = 200, description = "Register deleted", body = MessageResponse),
        (status = 404, description = "No such register for this student", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_register(
    State(state): State<AppState>,
    WithRejection(Path((student_id, register_id)), _): RegisterPath,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .registers
        .delete(student_id, register_id)
        .await?;
    Ok(MessageResponse::new("Register deleted successfully"))
}

/// Delete every register
#[utoipa::path(
    delete,
    path = "/registers",
    tag = "registers",
    responses(
        (status = 200, description = "All registers deleted", body = MessageResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_all_registers(
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    state.services.registers.delete_all().await?;
    Ok(MessageResponse::new("Registers deleted successfully"))
}
