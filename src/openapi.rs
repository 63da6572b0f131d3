use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    handlers,
    middleware::auth::TOKEN_HEADER,
    models::{CreateTripPayload, ErrorResponse, LoginRequest, SignupRequest, TripRequest, TripStatus},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::signup,
        handlers::auth::verify,
        handlers::auth::login,
        handlers::trips::create_return_trip,
        handlers::trips::list_trips,
    ),
    components(schemas(
        CreateTripPayload,
        TripRequest,
        TripStatus,
        SignupRequest,
        LoginRequest,
        ErrorResponse,
    )),
    modifiers(&TokenSecurity),
    tags(
        (name = "auth", description = "Accounts and sessions"),
        (name = "trips", description = "Travel requests")
    )
)]
pub struct ApiDoc;

struct TokenSecurity;

impl Modify for TokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(TOKEN_HEADER))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/v1/auth/signup",
            "/api/v1/auth/verify",
            "/api/v1/auth/login",
            "/api/v1/trips",
            "/api/v1/trips/return",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("token")));
    }
}
