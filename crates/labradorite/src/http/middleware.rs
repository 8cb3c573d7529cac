//! Per-request access logging.
//!
//! Emits one `info` event per request once the response is known: method,
//! path, status, latency and the client address.

use std::future::{Ready, ready};
use std::net::SocketAddr;
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::HeaderMap;
use futures_util::future::LocalBoxFuture;

/// Middleware factory; wrap the `App` with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogging;

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingMiddleware { service }))
    }
}

pub struct RequestLoggingMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_owned();
        let client = client_ip(req.headers(), req.peer_addr());

        let fut = self.service.call(req);
        Box::pin(async move {
            let result = fut.await;
            let latency = started.elapsed();
            match &result {
                Ok(res) => tracing::info!(
                    %method,
                    %path,
                    status = res.status().as_u16(),
                    ?latency,
                    %client,
                    "request"
                ),
                Err(err) => tracing::warn!(
                    %method,
                    %path,
                    error = %err,
                    ?latency,
                    %client,
                    "request failed"
                ),
            }
            result
        })
    }
}

/// Client address for logging: the first `X-Forwarded-For` entry, then
/// `X-Real-IP`, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
    };

    if let Some(first) = header("X-Forwarded-For")
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
    {
        return first.to_owned();
    }
    if let Some(real_ip) = header("X-Real-IP") {
        return real_ip.to_owned();
    }
    peer.map_or_else(|| "unknown".to_owned(), |addr| addr.ip().to_string())
}
