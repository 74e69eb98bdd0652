use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::links::{Link, PublicPerson};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CreatePersonRequest {
    /// Key must be present; the value may be `null`.
    #[schema(required = true)]
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub personnummer: Option<String>,
    pub account_balance: Option<f64>,
}

#[derive(ToSchema)]
pub struct UpdatePersonRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub personnummer: Option<String>,
    pub account_balance: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::persons::list_persons,
        crate::routes::persons::get_person,
        crate::routes::persons::create_person,
        crate::routes::persons::update_person,
        crate::routes::persons::delete_person,
    ),
    components(
        schemas(
            HealthResponse,
            CreatePersonRequest,
            UpdatePersonRequest,
            PublicPerson,
            Link,
        )
    ),
    tags(
        (name = "health"),
        (name = "persons")
    )
)]
pub struct ApiDoc;
