//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! axum request (ConnectInfo + headers)
//!     → middleware.rs (ClientIpPolicy::resolve)
//!     → ClientIp request extension
//!     → handlers / log statements
//! ```

pub mod middleware;

pub use middleware::{client_ip_middleware, ClientIp};
