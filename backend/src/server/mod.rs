//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;
pub use state_builders::{StartupError, build_http_state};

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use geodir_backend::Trace;
use geodir_backend::middleware::{FrontendOrigin, cors, security_headers};
#[cfg(debug_assertions)]
use geodir_backend::doc::ApiDoc;
use geodir_backend::inbound::http::health::HealthState;
use geodir_backend::inbound::http::state::HttpState;
use geodir_backend::inbound::http::{configure, route_not_found};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors_policy: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(security_headers())
        .wrap(cors_policy)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.default_service(web::to(route_not_found))
}

/// Construct an Actix HTTP server using the provided health state and settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Returns [`StartupError`] when the frontend URL is invalid, state wiring
/// fails or the socket cannot be bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> Result<Server, StartupError> {
    let frontend = FrontendOrigin::parse(settings.frontend_url())?;
    let http_state = web::Data::new(build_http_state(settings).await?);
    let server_health_state = health_state.clone();

    let (address, port) = settings.bind_target();
    info!(origin = frontend.as_str(), "allowing cross-origin requests");
    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            cors(&frontend),
        )
    })
    .bind((address, port))
    .map_err(|err| StartupError::Bind {
        address: format!("{address}:{port}"),
        message: err.to_string(),
    })?
    .run();

    info!(address, port, "server listening");
    health_state.mark_ready();
    Ok(server)
}
