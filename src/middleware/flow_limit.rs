use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{Extensions, Request};
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use tower::{Layer, Service};
use tracing::warn;

use crate::error::GuardError;
use crate::flow::{FlowDecision, RateLimiter};

/// 按客户端 IP 的流量限制层
///
/// 存储不可用时拒绝请求（fail closed）
#[derive(Clone)]
pub struct FlowLimitLayer {
    limiter: Arc<RateLimiter>,
}

impl FlowLimitLayer {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S> Layer<S> for FlowLimitLayer {
    type Service = FlowLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FlowLimitService {
            inner,
            limiter: self.limiter.clone(),
        }
    }
}

#[derive(Clone)]
pub struct FlowLimitService<S> {
    inner: S,
    limiter: Arc<RateLimiter>,
}

impl<S> Service<Request<Body>> for FlowLimitService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let limiter = self.limiter.clone();
        // 保证调用的是已 poll_ready 的那个实例
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let subject = client_ip(&req);
            match limiter.check(&subject).await {
                Ok(FlowDecision::Allowed { .. }) => inner.call(req).await,
                Ok(FlowDecision::Escalated) => Ok(GuardError::rate_limited(subject).into_response()),
                Ok(FlowDecision::Blocked) => Ok(GuardError::blocked(subject).into_response()),
                Err(err) => {
                    warn!(subject = %subject, error = %err, "flow check failed, rejecting request");
                    Ok(err.into_response())
                }
            }
        })
    }
}

/// 对端 IP；没有连接信息时归入同一个 "unknown" 主体
pub fn client_ip<B>(req: &Request<B>) -> String {
    ip_from_extensions(req.extensions())
}

fn ip_from_extensions(extensions: &Extensions) -> String {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// 处理函数中提取对端 IP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIp(ip_from_extensions(&parts.extensions)))
    }
}
