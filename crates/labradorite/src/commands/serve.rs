use std::sync::Arc;

use actix_web::{App, HttpServer, web};

use crate::cli::{GlobalOpts, ServeArgs};
use crate::config;
use crate::error::CliError;
use crate::http::{self, AppState, RequestLogging};

pub async fn handle(args: ServeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::resolve_for_serve(global, &args)?;

    // Nothing is served until every mapping (and, under fail-fast, every
    // document) has loaded.
    let catalog = super::load_catalog(&cfg)?;

    let state = web::Data::new(AppState {
        catalog: Arc::new(catalog),
        default_mode: cfg.default_mode(),
    });

    let bind_addr = cfg.bind_addr();
    tracing::info!(%bind_addr, default_mode = ?cfg.default_mode(), "starting HTTP server");

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(RequestLogging)
            .configure(http::configure)
    })
    .bind(&bind_addr)?;

    if cfg.server.workers > 0 {
        server = server.workers(cfg.server.workers);
    }

    server.run().await?;

    tracing::info!("server shutdown complete");
    Ok(())
}
