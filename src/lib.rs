//! Inventory catalog: a product REST API backed by SQLite and a client-side
//! store keeping a local view of the catalog in sync with it.

#[cfg(feature = "server")]
use std::{path::PathBuf, sync::Arc};

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::{Files, NamedFile};
#[cfg(feature = "server")]
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
#[cfg(feature = "server")]
use actix_web::middleware::{Compress, DefaultHeaders, Logger, from_fn};
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, web};

#[cfg(feature = "server")]
use crate::db::{establish_connection_pool, run_migrations};
#[cfg(feature = "server")]
use crate::middleware::{AllowAll, RequestGate, gate_data, request_gate};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

#[cfg(feature = "data")]
pub mod analytics;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "client")]
pub mod client;

/// Builds and runs the Actix-Web HTTP server with a gate that admits everything.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    run_with_gate(server_config, Arc::new(AllowAll)).await
}

/// Builds and runs the Actix-Web HTTP server, consulting `gate` before every request.
#[cfg(feature = "server")]
pub async fn run_with_gate(
    server_config: ServerConfig,
    gate: Arc<dyn RequestGate>,
) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    let repo = DieselRepository::new(pool);
    let gate = gate_data(gate);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving the product API on http://{}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let cors = match &server_config.cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600),
            None => Cors::permissive(),
        };

        let mut app = App::new()
            .wrap(from_fn(request_gate))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(gate.clone())
            .app_data(web::Data::new(repo.clone()))
            .configure(routes::configure);

        if let Some(static_dir) = &server_config.static_dir {
            app = app.service(spa_files(static_dir));
        }

        app
    })
    .bind(bind_address)?
    .run()
    .await
}

/// Serves the built frontend; unknown paths fall back to `index.html`.
#[cfg(feature = "server")]
fn spa_files(static_dir: &str) -> Files {
    let index = PathBuf::from(static_dir).join("index.html");

    Files::new("/", static_dir)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(index).await?;
                let res = file.into_response(&req);
                Ok::<_, actix_web::Error>(ServiceResponse::new(req, res))
            }
        }))
}
