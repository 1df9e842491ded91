//! HTTP 服务端模块
//!
//! 组装认证相关路由，限流层在最外层，其后是会话解析层

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

use crate::account::{AccountDirectory, AccountFlows, PasswordEncoder};
use crate::auth::{LoginOutcomeHandler, RevocationStore, SessionAuthenticator, TokenCodec};
use crate::clock::Clock;
use crate::config::{GuardConfig, ServerConfig};
use crate::error::Result;
use crate::flow::RateLimiter;
use crate::mail::MailPublisher;
use crate::middleware::{FlowLimitLayer, SessionLayer};
use crate::store::KvStore;
use crate::verify::{CodeGenerator, OneTimeCodeIssuer};

pub mod handlers;
pub mod requests;

/// 服务依赖的外部协作方
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn KvStore>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub encoder: Arc<dyn PasswordEncoder>,
    pub publisher: Arc<dyn MailPublisher>,
    pub generator: Arc<dyn CodeGenerator>,
    pub clock: Arc<dyn Clock>,
}

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<RateLimiter>,
    pub authenticator: Arc<SessionAuthenticator>,
    pub login: Arc<LoginOutcomeHandler>,
    pub codes: Arc<OneTimeCodeIssuer>,
    pub accounts: Arc<AccountFlows>,
}

impl AppState {
    pub fn new(config: &GuardConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            store,
            accounts,
            encoder,
            publisher,
            generator,
            clock,
        } = collaborators;

        let codec = Arc::new(TokenCodec::from_config(&config.jwt));
        let revocations = RevocationStore::new(store.clone());
        let codes = Arc::new(OneTimeCodeIssuer::from_config(
            store.clone(),
            publisher,
            generator,
            &config.verify,
        ));

        Self {
            limiter: Arc::new(RateLimiter::from_config(store, &config.flow)),
            authenticator: Arc::new(SessionAuthenticator::new(
                codec.clone(),
                revocations.clone(),
                clock.clone(),
            )),
            login: Arc::new(LoginOutcomeHandler::new(
                accounts.clone(),
                encoder.clone(),
                codec,
                revocations,
                clock,
            )),
            accounts: Arc::new(AccountFlows::new(accounts, encoder, codes.clone())),
            codes,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let auth = Router::new()
        .route("/ask-code", get(handlers::ask_code))
        .route("/login", post(handlers::login))
        .route("/logout", get(handlers::logout).post(handlers::logout))
        .route("/register", post(handlers::register))
        .route("/reset-confirm", post(handlers::reset_confirm))
        .route("/reset-password", post(handlers::reset_password));

    Router::new()
        .nest("/api/auth", auth)
        .route("/api/user/me", get(handlers::me))
        .route("/api/user/info", get(handlers::info))
        .layer(SessionLayer::new(state.authenticator.clone()))
        .layer(FlowLimitLayer::new(state.limiter.clone()))
        .with_state(state)
}

pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    Ok(TcpListener::bind(config.bind_address()).await?)
}

/// 运行服务直到 `shutdown` 完成
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "auth server listening");

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    info!("auth server stopped");
    Ok(())
}
