use axum::extract::{Form, Json, Query, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use tracing::debug;

use super::AppState;
use super::requests::{
    AskCodeQuery, LoginForm, RegisterRequest, ResetConfirmRequest, ResetPasswordRequest,
};
use crate::account::AccountView;
use crate::auth::{Authenticated, AuthorizeView, Principal};
use crate::error::{ApiResponse, Result};
use crate::middleware::ClientIp;
use crate::verify::{CodeDelivery, CodeKind};

pub async fn ask_code(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Query(query): Query<AskCodeQuery>,
) -> Result<ApiResponse<()>> {
    query.validate()?;
    let kind: CodeKind = query.kind.parse()?;
    let delivery = state.codes.request_code(kind, &query.email, &ip).await?;
    if delivery == CodeDelivery::PublishFailed {
        debug!(email = %query.email, "code stored without delivery");
    }
    Ok(ApiResponse::ok())
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<ApiResponse<AuthorizeView>> {
    form.validate()?;
    let outcome = state.login.login(&form.username, &form.password).await?;
    Ok(ApiResponse::success(outcome.into()))
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<ApiResponse<()>> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    state.login.logout(authorization).await?;
    Ok(ApiResponse::ok())
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<ApiResponse<()>> {
    request.validate()?;
    state
        .accounts
        .register(&request.email, &request.username, &request.password, &request.code)
        .await?;
    Ok(ApiResponse::ok())
}

pub async fn reset_confirm(
    State(state): State<AppState>,
    Json(request): Json<ResetConfirmRequest>,
) -> Result<ApiResponse<()>> {
    request.validate()?;
    state.accounts.reset_confirm(&request.email, &request.code).await?;
    Ok(ApiResponse::ok())
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<ApiResponse<()>> {
    request.validate()?;
    state
        .accounts
        .reset_password(&request.email, &request.code, &request.password)
        .await?;
    Ok(ApiResponse::ok())
}

pub async fn me(Authenticated(principal): Authenticated) -> ApiResponse<Principal> {
    ApiResponse::success(principal)
}

pub async fn info(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
) -> Result<ApiResponse<AccountView>> {
    let account = state.accounts.account_info(principal.subject_id).await?;
    Ok(ApiResponse::success(account))
}
