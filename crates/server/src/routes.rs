pub mod cars;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use common::types::Health;
use service::CarStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router: car CRUD routes plus `/health`.
///
/// Every car path answers unsupported methods with 405 through the same
/// fallback handler. Paths the `:id` route cannot match (`/cars/`,
/// `/cars/1/2`) land in the router fallback and are rejected as invalid ids.
pub fn build_router(store: Arc<CarStore>, cors: CorsLayer) -> Router {
    let car_routes = Router::new()
        .route("/cars", get(cars::list_cars).fallback(cars::method_not_allowed))
        .route("/cars/create", post(cars::create_car).fallback(cars::method_not_allowed))
        .route(
            "/cars/delete_all",
            delete(cars::delete_all_cars).fallback(cars::method_not_allowed),
        )
        .route(
            "/cars/:id",
            get(cars::get_car)
                .put(cars::update_car)
                .patch(cars::update_car)
                .delete(cars::delete_car)
                .fallback(cars::method_not_allowed),
        );

    Router::new()
        .route("/health", get(health))
        .merge(car_routes)
        .fallback(cars::unmatched_car_path)
        .with_state(store)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
