use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub mod pages;
pub mod scholarships;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Anything not matched above: the scholarship subtree or the homepage.
async fn fallback(state: State<ServerState>, req: Request) -> Response {
    if req.uri().path().starts_with(scholarships::SUBTREE) {
        scholarships::dispatch(state, req).await
    } else {
        pages::homepage().await.into_response()
    }
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/time", any(pages::time_page))
        .route(scholarships::COLLECTION, any(scholarships::dispatch))
        .route("/scholarships/*rest", any(scholarships::dispatch))
        .fallback(fallback)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span（方法、路径），INFO 级别
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                // 请求到达时打点
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时记录状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx 等失败以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
