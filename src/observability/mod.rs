//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! caller/ + net/ helpers
//!     → fields.rs (LogFields: caller, line, client_ip, local_ip)
//!     → serialized by the logger, or recorded onto a tracing span
//!
//! logging.rs installs the subscriber used by the CLI
//! ```

pub mod fields;
pub mod logging;

pub use fields::LogFields;
pub use logging::init_logging;
