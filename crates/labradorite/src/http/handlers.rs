//! Request handlers.

use std::sync::Arc;

use actix_web::http::header::ContentType;
use actix_web::http::{Method, StatusCode};
use actix_web::{HttpRequest, HttpResponse, web};

use labradorite_core::{Category, Lookup, TraversalMode};

use super::AppState;
use super::error::ApiError;

/// Request header that switches a lookup to strict traversal.
pub const STRICT_HEADER: &str = "Labradorite-FailOnSubkeys";

const HELP_TEXT: &str = "\
Welcome to the Labradorite API server.

Available endpoints:

/api/v0/identifier
  - Returns a JSON based on the provided model identifier (i.e. iPhone17,2)
  - Rolling release endpoint is available at /api/identifier
/api/v0/model
  - Returns a JSON based on the provided model number (i.e. A3084)
  - Rolling release endpoint is available at /api/model
/api/v0/boardconfig
  - Returns a JSON based on the provided boardconfig (i.e. D94AP)
  - Rolling release endpoint is available at /api/boardconfig

Notes on endpoints:

All endpoints support drilling. You can supply nested key names to only return those values.
  - /api/boardconfig/D94AP will return the full json for \"D94AP\".
  - /api/boardconfig/D94AP/chips/soc will return the value for \"chips.soc\" in the json for \"D94AP\".
Identifiers are matched case-insensitively.
Send the header \"Labradorite-FailOnSubkeys: true\" to fail instead of stopping early
when a nested key lands on something that is not an object.
";

/// `GET /api[/v0]/{category}/{identifier}[/{subkey}...]`
pub async fn device(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let category: Category = req
        .match_info()
        .query("category")
        .parse()
        .map_err(|_| ApiError::UnknownEndpoint)?;

    let mode = requested_mode(&req, state.default_mode);
    let lookup = Lookup::from_path(category, req.path())?.with_mode(mode);

    let catalog = Arc::clone(&state.catalog);
    let resolution = web::block(move || catalog.resolve(&lookup)).await??;
    let body = resolution.to_json()?;

    tracing::debug!(source = resolution.source.as_str(), bytes = body.len(), "responding");

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .insert_header(("Cow", "true"))
        .body(body))
}

/// `GET /help`
#[allow(clippy::unused_async)]
pub async fn help() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header(("Cow", "true"))
        .body(HELP_TEXT)
}

/// `/cow`, any method.
#[allow(clippy::unused_async)]
pub async fn moo() -> HttpResponse {
    HttpResponse::build(StatusCode::IM_A_TEAPOT)
        .content_type(ContentType::plaintext())
        .body("moo\n")
}

/// Everything no route claims.
#[allow(clippy::unused_async)]
pub async fn fallback(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if req.method() == Method::GET {
        Err(ApiError::UnknownEndpoint)
    } else {
        Err(ApiError::MethodNotAllowed)
    }
}

fn requested_mode(req: &HttpRequest, default: TraversalMode) -> TraversalMode {
    match req
        .headers()
        .get(STRICT_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        Some("true") => TraversalMode::Strict,
        _ => default,
    }
}
