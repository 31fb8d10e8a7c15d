//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, registers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending Ledger API",
        version = "1.0.0",
        description = "Equipment lending ledger REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Registers
        registers::create_register,
        registers::list_registers,
        registers::get_register,
        registers::update_register,
        registers::delete_register,
        registers::delete_all_registers,
    ),
    components(
        schemas(
            // Registers
            crate::models::register::CreateRegister,
            crate::models::register::UpdateRegister,
            crate::models::register::RegisterDetails,
            registers::CreatedResponse,
            registers::MessageResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "registers", description = "Equipment loan registers")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
