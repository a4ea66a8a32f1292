//! OpenAPI document for the public endpoints.

use utoipa::OpenApi;

use super::dto::{ContactRequest, ResponseStatus, StatusResponse};
use super::handlers::{contact, system};

/// Generated OpenAPI 3 description of the service.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "contact-gateway",
        description = "Contact form backend: validates submissions and stores them."
    ),
    paths(contact::submit_contact, system::health_handler),
    components(schemas(ContactRequest, StatusResponse, ResponseStatus, system::HealthResponse)),
    tags(
        (name = "Contact", description = "Contact form submission"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
