use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use models::Scholarship;
use tracing::debug;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const COLLECTION: &str = "/scholarships";
pub const SUBTREE: &str = "/scholarships/";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Single entry for `/scholarships` and everything under it; picks the
/// operation from the method.
pub async fn dispatch(State(state): State<ServerState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let result = match parts.method {
        Method::GET => get(&state, &parts).await,
        Method::POST => post(&state, &parts, body).await,
        Method::PUT | Method::PATCH => put(&state, &parts, body).await,
        Method::DELETE => delete(&state, &parts).await,
        _ => Err(ApiError::MethodNotAllowed),
    };
    result.unwrap_or_else(IntoResponse::into_response)
}

/// Identifier from a path of exactly `/<collection>/<name>`.
///
/// `/scholarships` and `/scholarships/a/b` have none; `/scholarships/`
/// has the empty one.
pub fn name_from_path(path: &str) -> Option<&str> {
    let mut parts = path.split('/');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(_), Some(name), None) => Some(name),
        _ => None,
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct == JSON_CONTENT_TYPE)
}

async fn read_body(body: Body, limit: usize) -> Result<axum::body::Bytes, ApiError> {
    to_bytes(body, limit)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Scholarship, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Whole store, or one record when the identifier exists.
async fn get(state: &ServerState, parts: &Parts) -> Result<Response, ApiError> {
    let name = name_from_path(parts.uri.path());
    let found = state.scholarships.lookup(name).await?;
    Ok((StatusCode::OK, Json(found)).into_response())
}

async fn post(state: &ServerState, parts: &Parts, body: Body) -> Result<Response, ApiError> {
    let bytes = read_body(body, state.max_body_bytes).await?;
    if !is_json(&parts.headers) {
        return Err(ApiError::UnsupportedMediaType);
    }
    let scholarship = decode(&bytes)?;
    let created = state.scholarships.create(scholarship).await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

async fn put(state: &ServerState, parts: &Parts, body: Body) -> Result<Response, ApiError> {
    let name = name_from_path(parts.uri.path()).ok_or(ApiError::NotFound)?;
    let bytes = read_body(body, state.max_body_bytes).await?;
    if !is_json(&parts.headers) {
        return Err(ApiError::UnsupportedMediaType);
    }
    let scholarship = decode(&bytes)?;
    debug!(%name, amount = scholarship.amount, "update requested");
    let current = state.scholarships.update(name, scholarship).await?;
    Ok((StatusCode::OK, Json(current)).into_response())
}

async fn delete(state: &ServerState, parts: &Parts) -> Result<Response, ApiError> {
    let name = name_from_path(parts.uri.path()).ok_or(ApiError::NotFound)?;
    state.scholarships.delete(name).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_from_paths() {
        assert_eq!(name_from_path("/scholarships"), None);
        assert_eq!(name_from_path("/scholarships/test"), Some("test"));
        assert_eq!(name_from_path("/scholarships/"), Some(""));
        assert_eq!(name_from_path("/scholarships/a/b"), None);
        assert_eq!(name_from_path("/"), None);
    }

    #[test]
    fn content_type_must_match_exactly() {
        let mut h = HeaderMap::new();
        assert!(!is_json(&h));
        h.insert(CONTENT_TYPE, "application/json".parse().unwrap());
        assert!(is_json(&h));
        h.insert(CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(!is_json(&h));
        h.insert(CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!is_json(&h));
    }

    #[test]
    fn decode_errors_are_bad_requests() {
        assert!(matches!(decode(b"{"), Err(ApiError::BadRequest(_))));
        assert_eq!(decode(br#"{"Name":"a","Amount":3}"#).unwrap(), Scholarship::new("a", 3));
    }
}
