//! Web 服务器模块
//!
//! 提供问答页面（表单提交）和 JSON API

pub mod page;

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info, Instrument};

use crate::application::ChatSession;
use crate::errors::FaqError;
use crate::infrastructure::logger::RequestContext;
use crate::request_span;

// ==================== 错误响应 ====================

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn status_for(err: &FaqError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_response(err: FaqError) -> Response {
    (
        status_for(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ==================== 状态 ====================

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ChatSession>,
}

// ==================== 请求类型 ====================

/// 页面表单
#[derive(Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub query: String,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
}

// ==================== 页面处理器 ====================

/// 问答页面
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let messages = state.session.messages().await;
    Html(page::render_page(&messages, None))
}

/// 表单提交：成功后重定向回页面，失败时直接渲染错误
async fn ask_form(State(state): State<Arc<AppState>>, Form(form): Form<AskForm>) -> Response {
    let ctx = RequestContext::new();
    let result = state
        .session
        .submit(&form.query)
        .instrument(request_span!(ctx))
        .await;

    match result {
        Ok(_) => {
            info!(request_id = %ctx.request_id, elapsed_ms = (ctx.elapsed().as_millis() as u64), "question handled");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            error!(request_id = %ctx.request_id, error = %e, "question failed");
            let messages = state.session.messages().await;
            let html = page::render_page(&messages, Some(e.to_string().as_str()));
            (status_for(&e), Html(html)).into_response()
        }
    }
}

/// 重置对话
async fn reset_form(State(state): State<Arc<AppState>>) -> Response {
    match state.session.reset().await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => {
            error!(error = %e, "reset failed");
            let html = page::render_page(&[], Some(e.to_string().as_str()));
            (status_for(&e), Html(html)).into_response()
        }
    }
}

// ==================== API 处理器 ====================

/// 健康检查
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 获取对话记录
async fn list_messages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.messages().await)
}

/// 提问
async fn ask_api(State(state): State<Arc<AppState>>, Json(req): Json<AskRequest>) -> Response {
    let ctx = RequestContext::new();
    let result = state
        .session
        .submit(&req.question)
        .instrument(request_span!(ctx))
        .await;

    match result {
        Ok(Some(answer)) => Json(AskResponse { answer }).into_response(),
        Ok(None) => error_response(FaqError::Validation("question must not be empty".into())),
        Err(e) => {
            error!(request_id = %ctx.request_id, error = %e, "question failed");
            error_response(e)
        }
    }
}

/// 清空对话记录
async fn clear_messages(State(state): State<Arc<AppState>>) -> Response {
    match state.session.reset().await {
        Ok(()) => Json(serde_json::json!({ "status": "cleared" })).into_response(),
        Err(e) => {
            error!(error = %e, "reset failed");
            error_response(e)
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(index))
        .route("/ask", post(ask_form))
        .route("/reset", post(reset_form))
        .route("/api/health", get(health_check))
        .route(
            "/api/messages",
            get(list_messages).post(ask_api).delete(clear_messages),
        )
        .layer(cors)
        .with_state(state)
}

/// 启动 Web 服务器
pub async fn start_web_server(bind_addr: &str, session: Arc<ChatSession>) -> anyhow::Result<()> {
    let state = Arc::new(AppState { session });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
