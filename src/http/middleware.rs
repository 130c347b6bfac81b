//! Client IP middleware.
//!
//! Resolves the client IP once per request and stores it as a [`ClientIp`]
//! extension so handlers and log statements read the same value.

use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, State},
    http::{request::Parts, Extensions, Request},
    middleware::Next,
    response::Response,
};

use crate::net::{resolve_client_ip, ClientIpPolicy};

/// Client IP resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIp(pub String);

impl ClientIp {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport peer as `host:port`, empty when the server was not started with
/// connect info.
fn remote_addr(extensions: &Extensions) -> String {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default()
}

pub async fn client_ip_middleware(
    State(policy): State<Arc<ClientIpPolicy>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let remote = remote_addr(request.extensions());
    let client_ip = policy.resolve(&remote, request.headers());

    tracing::Span::current().record("client_ip", client_ip.as_str());
    tracing::trace!(remote_addr = %remote, client_ip = %client_ip, "Resolved client IP");

    request.extensions_mut().insert(ClientIp(client_ip));
    next.run(request).await
}

/// Reads the value stored by [`client_ip_middleware`], or resolves it with
/// the default policy when the middleware is not installed.
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ip) = parts.extensions.get::<ClientIp>() {
            return Ok(ip.clone());
        }

        let remote = remote_addr(&parts.extensions);
        Ok(ClientIp(resolve_client_ip(&remote, &parts.headers)))
    }
}
