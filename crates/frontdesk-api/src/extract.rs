//! Client network details, captured per request.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use http::Extensions;

use frontdesk_core::ClientInfo;

/// Extractor that resolves the caller's IP and user-agent.
///
/// Never rejects: an unresolvable address yields `None` and a missing
/// user-agent header becomes `Unknown`, matching what gets persisted on
/// the enquiry row.
#[derive(Debug, Clone)]
pub struct ClientDetails(pub ClientInfo);

impl<S> FromRequestParts<S> for ClientDetails
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(ClientInfo {
            ip_address: client_ip(&parts.headers, &parts.extensions),
            user_agent: user_agent(&parts.headers),
        }))
    }
}

/// Resolves the client address: first hop of `X-Forwarded-For` when a
/// proxy supplied one, otherwise the socket peer address.
pub fn client_ip(headers: &HeaderMap, extensions: &Extensions) -> Option<String> {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return Some(forwarded.to_string());
    }
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}

fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("Unknown")
        .to_string()
}
