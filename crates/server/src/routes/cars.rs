//! Handlers for the `/cars` resource.
//!
//! Bodies are decoded by hand from raw bytes so that any decode failure is a
//! 400 carrying the decoder's message, whatever the content type.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use models::{Car, CarId, CarInput};
use service::{CarStore, UpdateOutcome};

use crate::errors::ApiError;

/// Parse the trailing path segment; only positive integers are ids.
pub fn parse_id(raw: &str) -> Result<CarId, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id as CarId),
        _ => Err(ApiError::invalid_id()),
    }
}

pub async fn list_cars(State(store): State<Arc<CarStore>>) -> Json<Vec<Car>> {
    Json(store.list().await)
}

pub async fn create_car(
    State(store): State<Arc<CarStore>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Car>), ApiError> {
    let input = CarInput::from_json(&body)?;
    let car = store.create(input).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

pub async fn get_car(
    State(store): State<Arc<CarStore>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Car>, ApiError> {
    let id = parse_id(&raw_id)?;
    Ok(Json(store.get(id).await?))
}

/// PUT and PATCH share this handler: complete payloads answer 200 with the
/// record, anything else 204.
pub async fn update_car(
    State(store): State<Arc<CarStore>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;
    let input = CarInput::from_json(&body)?;
    match store.update(id, input).await? {
        UpdateOutcome::Full(car) => Ok((StatusCode::OK, Json(car)).into_response()),
        UpdateOutcome::Partial => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub async fn delete_car(
    State(store): State<Arc<CarStore>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all_cars(State(store): State<Arc<CarStore>>) -> Result<StatusCode, ApiError> {
    store.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

const ITEM_PREFIX: &str = "/cars/";

/// Router fallback. Under `/cars/` the trailing part is empty or spans several
/// segments, so item verbs get 400 and anything else 405; other paths 404.
pub async fn unmatched_car_path(method: Method, uri: Uri) -> Response {
    let Some(trailing) = uri.path().strip_prefix(ITEM_PREFIX) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match method {
        Method::GET | Method::PUT | Method::PATCH | Method::DELETE => match parse_id(trailing) {
            Ok(_) => StatusCode::NOT_FOUND.into_response(),
            Err(e) => e.into_response(),
        },
        _ => ApiError::MethodNotAllowed.into_response(),
    }
}
