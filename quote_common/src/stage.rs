//! Names of the pipeline stages, used in timeout errors and log lines.
use strum_macros::Display;

/// A step of the quotation pipeline that runs under a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    /// Server: outbound call to the exchange-rate API.
    Fetch,
    /// Server: in-memory transform of the upstream payload.
    Build,
    /// Server: durable write of the quotation.
    Persist,
    /// Client: the whole round trip to the quotation server.
    Request,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_lowercase() {
        assert_eq!(Stage::Fetch.to_string(), "fetch");
        assert_eq!(Stage::Persist.to_string(), "persist");
        assert_eq!(Stage::Request.to_string(), "request");
    }
}
