use super::handlers::{root, user_login, user_signup, Credentials, Message};
use utoipa::OpenApi;

// Title, version, description and license are taken from Cargo.toml by utoipa.
#[derive(OpenApi)]
#[openapi(
    paths(root::root, user_signup::signup, user_login::login),
    components(schemas(Credentials, Message, root::ServiceInfo)),
    tags(
        (name = "authgate", description = "Service descriptor"),
        (name = "auth", description = "Signup and login")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
