use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use axum::http::header::AUTHORIZATION;
use axum::response::Response;
use futures::future::BoxFuture;
use tower::{Layer, Service};

use crate::auth::{RequestContext, SessionAuthenticator};

/// 解析 Bearer 令牌并把 [`RequestContext`] 写入请求扩展
///
/// 从不拒绝请求，认证失败即匿名
#[derive(Clone)]
pub struct SessionLayer {
    authenticator: Arc<SessionAuthenticator>,
}

impl SessionLayer {
    pub fn new(authenticator: Arc<SessionAuthenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            authenticator: self.authenticator.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SessionService<S> {
    inner: S,
    authenticator: Arc<SessionAuthenticator>,
}

impl<S> Service<Request<Body>> for SessionService<S>
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

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let authenticator = self.authenticator.clone();
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let context = match authenticator.authenticate(header.as_deref()).await {
                Some(principal) => RequestContext::authenticated(principal),
                None => RequestContext::anonymous(),
            };
            req.extensions_mut().insert(context);
            inner.call(req).await
        })
    }
}
