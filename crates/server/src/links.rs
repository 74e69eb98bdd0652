//! Hypermedia projection of person records.
//!
//! Every record leaving the service is wrapped as a [`PublicPerson`]: the raw
//! `id` is replaced by the absolute `uri` of the resource plus `self`,
//! `update` and `delete` links pointing at it.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, Uri},
};
use serde::{Deserialize, Serialize};
use service::Person;
use std::convert::Infallible;
use utoipa::ToSchema;

use crate::state::{LinkConfig, ServerState};

pub const PERSONS_PATH: &str = "/persons";

/// Scheme and authority of the service as seen by the caller, without a trailing slash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self(base.trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn person_uri(&self, id: u64) -> String {
        format!("{}{}/{}", self.0, PERSONS_PATH, id)
    }
}

/// Work out the caller-facing base URL.
///
/// Order: configured public base, then `X-Forwarded-Proto` + `Host`, then the
/// request URI's own authority, then the configured fallback authority.
pub fn resolve_base_url(headers: &HeaderMap, uri: &Uri, cfg: &LinkConfig) -> BaseUrl {
    if let Some(base) = cfg.public_base_url.as_deref() {
        return BaseUrl::new(base);
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| s == "http" || s == "https")
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());

    let authority = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| cfg.fallback_authority.clone());

    BaseUrl::new(format!("{scheme}://{authority}"))
}

#[async_trait]
impl FromRequestParts<ServerState> for BaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        Ok(resolve_base_url(&parts.headers, &parts.uri, &state.links))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Link {
    fn new(rel: &str, href: &str, method: Option<&str>) -> Self {
        Self { rel: rel.into(), href: href.into(), method: method.map(str::to_string) }
    }
}

/// Outbound view of a [`Person`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PublicPerson {
    pub uri: String,
    pub links: Vec<Link>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub personnummer: Option<String>,
    pub account_balance: Option<f64>,
}

impl PublicPerson {
    pub fn from_person(person: &Person, base: &BaseUrl) -> Self {
        let uri = base.person_uri(person.id);
        let links = vec![
            Link::new("self", &uri, None),
            Link::new("update", &uri, Some("PUT")),
            Link::new("delete", &uri, Some("DELETE")),
        ];
        Self {
            uri,
            links,
            name: person.name.clone(),
            address: person.address.clone(),
            phone_number: person.phone_number.clone(),
            personnummer: person.personnummer.clone(),
            account_balance: person.account_balance,
        }
    }
}
