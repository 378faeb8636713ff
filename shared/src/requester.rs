use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// Where the server takes a voter's identity from.
///
/// `RemoteAddr` is the peer address of the connection. Behind a reverse proxy
/// every request shares the proxy's address, so all visitors count as a single
/// voter. `Forwarded` trusts `X-Real-IP` / `X-Forwarded-For` instead, which any
/// client can forge unless a proxy overwrites them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    #[default]
    RemoteAddr,
    Forwarded,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown identity source: {0} (expected \"remote\" or \"forwarded\")")]
pub struct UnknownIdentitySource(pub String);

impl FromStr for IdentitySource {
    type Err = UnknownIdentitySource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" | "remote_addr" => Ok(IdentitySource::RemoteAddr),
            "forwarded" => Ok(IdentitySource::Forwarded),
            other => Err(UnknownIdentitySource(other.to_string())),
        }
    }
}

/// The string votes are deduplicated on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequesterIdentity(String);

impl RequesterIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequesterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Picks the identity for a request from the header values and peer address.
pub fn resolve_identity(
    source: IdentitySource,
    real_ip: Option<&str>,
    forwarded_for: Option<&str>,
    remote: Option<std::net::IpAddr>,
) -> Option<RequesterIdentity> {
    let from_headers = || {
        real_ip
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .or_else(|| {
                forwarded_for
                    .and_then(|list| list.split(',').next())
                    .map(str::trim)
                    .filter(|ip| !ip.is_empty())
            })
            .map(RequesterIdentity::new)
    };
    let from_peer = || remote.map(|ip| RequesterIdentity::new(ip.to_string()));

    match source {
        IdentitySource::RemoteAddr => from_peer(),
        IdentitySource::Forwarded => from_headers().or_else(from_peer),
    }
}

// Backend-specific Rocket implementation
#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::http::Status;
    use rocket::request::{FromRequest, Outcome};
    use rocket::Request;

    #[rocket::async_trait]
    impl<'r> FromRequest<'r> for RequesterIdentity {
        type Error = ();

        async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
            let source = req.rocket()
                .state::<IdentitySource>()
                .copied()
                .unwrap_or_default();

            let headers = req.headers();
            let identity = resolve_identity(
                source,
                headers.get_one("X-Real-IP"),
                headers.get_one("X-Forwarded-For"),
                req.remote().map(|addr| addr.ip()),
            );

            match identity {
                Some(identity) => Outcome::Success(identity),
                None => Outcome::Error((Status::BadRequest, ())),
            }
        }
    }
}
