//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use logmeta::{client_ip_middleware, ClientIp, ClientIpPolicy};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Router that echoes the resolved client IP, wrapped in the middleware.
pub fn echo_router(policy: ClientIpPolicy) -> Router {
    Router::new()
        .route("/", get(|ip: ClientIp| async move { ip.as_str().to_owned() }))
        .layer(middleware::from_fn_with_state(Arc::new(policy), client_ip_middleware))
}

/// Serve `router` with connect info on an ephemeral loopback port.
#[allow(dead_code)]
pub async fn spawn_app(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let app = router.into_make_service_with_connect_info::<SocketAddr>();
        let _ = axum::serve(listener, app).await;
    });

    addr
}

/// Send a bare HTTP/1.1 GET and return the response body.
#[allow(dead_code)]
pub async fn raw_get(addr: SocketAddr, headers: &[(&str, &str)]) -> String {
    let mut socket = TcpStream::connect(addr).await.unwrap();

    let mut request = format!("GET / HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (name, value) in headers {
        request.push_str(&format!("{name}: {value}\r\n"));
    }
    request.push_str("\r\n");
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    socket.read_to_string(&mut response).await.unwrap();

    match response.split_once("\r\n\r\n") {
        Some((_, body)) => body.to_string(),
        None => panic!("malformed response: {response:?}"),
    }
}
