//! Network metadata subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (remote addr + headers)
//!     → addr.rs (split host:port)
//!     → client_ip.rs (proxy headers → transport host → loopback rewrite)
//!     → `client_ip` log field
//!
//! Host interfaces (OS snapshot)
//!     → local_ip.rs (first non-loopback IPv4)
//!     → `local_ip` log field
//! ```
//!
//! # Design Decisions
//! - Read-only queries; no shared state, safe from any thread
//! - Failures collapse into empty strings at the public surface

pub mod addr;
pub mod client_ip;
pub mod local_ip;

pub use addr::split_host_port;
pub use client_ip::{resolve_client_ip, ClientIpPolicy, X_FORWARDED_FOR, X_REAL_IP};
pub use local_ip::{host_addresses, resolve_local_ip, select_local_ipv4, HostAddress};
