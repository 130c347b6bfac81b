//! Log record enrichment.
//!
//! Bundles the caller location, client IP and local IP into one value that a
//! logger can serialize or record onto a `tracing` span.

use axum::http::HeaderMap;
use serde::Serialize;

use crate::caller::{capture, format_location};
use crate::net::{resolve_local_ip, ClientIpPolicy};

/// Metadata fields attached to a log record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogFields {
    /// `"parentDir/file"`, empty when unknown.
    pub caller: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    /// First non-loopback IPv4 of this host, empty when unknown.
    pub local_ip: String,
}

impl LogFields {
    /// Collect caller and host fields for the function `skip` levels above
    /// the caller of `collect`.
    #[inline(never)]
    pub fn collect(skip: usize) -> Self {
        let (caller, line) = format_location(&capture(skip + 1));
        Self {
            caller,
            line,
            client_ip: None,
            local_ip: resolve_local_ip(),
        }
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    /// Resolve and attach the client IP of an inbound request.
    pub fn with_request(self, policy: &ClientIpPolicy, remote_addr: &str, headers: &HeaderMap) -> Self {
        let client_ip = policy.resolve(remote_addr, headers);
        self.with_client_ip(client_ip)
    }

    /// Record the fields onto `span`.
    ///
    /// Only fields the span declared (e.g. `caller = tracing::field::Empty`)
    /// are stored; the rest are ignored by `tracing`.
    pub fn record(&self, span: &tracing::Span) {
        span.record("caller", self.caller.as_str());
        span.record("line", self.line);
        span.record("local_ip", self.local_ip.as_str());
        if let Some(client_ip) = &self.client_ip {
            span.record("client_ip", client_ip.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_points_at_caller() {
        let fields = LogFields::collect(0);
        assert_eq!(fields.caller, "observability/fields.rs");
        assert!(fields.line > 0);
        assert_eq!(fields.client_ip, None);
    }

    #[test]
    fn serializes_without_missing_client_ip() {
        let fields = LogFields {
            caller: "net/client_ip.rs".into(),
            line: 10,
            client_ip: None,
            local_ip: "10.0.0.5".into(),
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "caller": "net/client_ip.rs",
                "line": 10,
                "local_ip": "10.0.0.5",
            })
        );

        let json = serde_json::to_value(fields.with_client_ip("1.2.3.4")).unwrap();
        assert_eq!(json["client_ip"], "1.2.3.4");
    }

    #[test]
    fn with_request_applies_policy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "9.9.9.9".parse().unwrap());

        let fields = LogFields::default().with_request(&ClientIpPolicy::default(), "1.2.3.4:80", &headers);
        assert_eq!(fields.client_ip.as_deref(), Some("9.9.9.9"));

        let fields = LogFields::default().with_request(&ClientIpPolicy::new().without_headers(), "1.2.3.4:80", &headers);
        assert_eq!(fields.client_ip.as_deref(), Some("1.2.3.4"));
    }
}
