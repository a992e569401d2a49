use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Greeting;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod people;

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Liveness greeting", body = crate::openapi::GreetingDoc)))]
pub async fn hello() -> Json<Greeting> {
    Json(Greeting::default())
}

/// Build the full application router: greeting, people resource, API docs
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // People resource
    let people_routes = Router::new()
        .route("/people", get(people::list).post(people::create))
        .route(
            "/people/:id",
            get(people::get).put(people::update).delete(people::delete),
        );

    // Compose, then CORS and request tracing
    Router::new()
        .route("/", get(hello))
        .merge(people_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // request arrival
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // failures (5xx) at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
