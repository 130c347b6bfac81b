//! Caller and client metadata helpers for log records.

pub mod caller;
pub mod config;
pub mod error;
pub mod http;
pub mod net;
pub mod observability;

pub use caller::{capture, format_location, Frame};
pub use config::schema::MetaConfig;
pub use error::MetaError;
pub use http::{client_ip_middleware, ClientIp};
pub use net::{resolve_client_ip, resolve_local_ip, ClientIpPolicy};
pub use observability::LogFields;
