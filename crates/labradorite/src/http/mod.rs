//! HTTP front end: routes, shared state, error mapping, access logging.

mod error;
mod handlers;
mod middleware;

use std::sync::Arc;

use actix_web::web;

use labradorite_core::{Catalog, TraversalMode};

pub use middleware::RequestLogging;

/// State shared by every worker. The catalog is never mutated after load.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Traversal mode for requests that do not send the strict header.
    pub default_mode: TraversalMode,
}

/// Register every route. Order matters: the versioned prefix must be tried
/// before the rolling one, and the catch-all goes last.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for prefix in ["/api/v0", "/api"] {
        cfg.service(
            web::resource(format!("{prefix}/{{category}}/{{tail:.*}}"))
                .route(web::get().to(handlers::device))
                .default_service(web::to(handlers::fallback)),
        );
    }
    cfg.service(
        web::resource("/help")
            .route(web::get().to(handlers::help))
            .default_service(web::to(handlers::fallback)),
    )
    .service(web::resource("/cow").to(handlers::moo))
    .service(web::resource("/{tail:.*}").to(handlers::fallback));
}
