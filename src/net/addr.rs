//! Transport address parsing.

/// Split a `host:port` or `[host]:port` address into host and port.
///
/// Returns `None` when the port separator is missing, when an unbracketed
/// host contains further colons, or when brackets are unbalanced. Empty
/// host or port parts are accepted.
pub fn split_host_port(addr: &str) -> Option<(&str, &str)> {
    if let Some(rest) = addr.strip_prefix('[') {
        let end = rest.find(']')?;
        let host = &rest[..end];
        let port = rest[end + 1..].strip_prefix(':')?;
        if host.contains('[') || port.contains(['[', ']']) {
            return None;
        }
        return Some((host, port));
    }

    let (host, port) = addr.rsplit_once(':')?;
    if host.contains([':', '[', ']']) || port.contains(['[', ']']) {
        return None;
    }
    Some((host, port))
}
