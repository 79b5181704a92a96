//! Shared networking constants and helpers used by client and server.

/// HTTP port the quotation server listens on.
pub const SERVER_PORT: u16 = 8080;
/// Path of the quotation endpoint.
pub const QUOTE_PATH: &str = "/cotacao";

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Full URL of the quotation endpoint on `host:port`.
pub fn quote_url(host: &str, port: u16) -> String {
    format!("http://{}{}", addr(host, port), QUOTE_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_default_endpoint_url() {
        assert_eq!(
            quote_url("127.0.0.1", SERVER_PORT),
            "http://127.0.0.1:8080/cotacao"
        );
    }
}
