use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Rate-limit key used when no address can be derived at all.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Best-effort client address for rate-limit keying.
///
/// Prefers the first comma-separated token of `x-forwarded-for` (the
/// deployment sits behind a proxy), falling back to the transport peer
/// address, then to a fixed marker. Forwarded headers are client-influenced,
/// so the result must never be used for authorization.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("192.0.2.10:54321".parse().unwrap())
    }

    #[test]
    fn forwarded_header_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(resolve_client_ip(&headers, peer()), "203.0.113.7");
    }

    #[test]
    fn blank_forwarded_header_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("   "));
        assert_eq!(resolve_client_ip(&headers, peer()), "192.0.2.10");
    }

    #[test]
    fn peer_address_without_header() {
        assert_eq!(resolve_client_ip(&HeaderMap::new(), peer()), "192.0.2.10");
    }

    #[test]
    fn unknown_marker_when_nothing_available() {
        assert_eq!(resolve_client_ip(&HeaderMap::new(), None), UNKNOWN_CLIENT);
    }
}
