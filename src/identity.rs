//! Who is asking
//!
//! Authentication is delegated to whatever sits in front of the portal (an
//! OAuth proxy, typically). The portal only reads the verified identity it
//! forwards.

use http::HeaderMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub name: Option<String>,
}

impl Identity {
    pub fn new(email: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            email: email.into(),
            name: name.map(str::to_string),
        }
    }

    /// Name to greet the user with; the email when no name was forwarded.
    pub fn greeting_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Source of the authenticated identity for a request.
pub trait IdentityProvider: Send + Sync {
    /// `None` means the request is unauthenticated.
    fn identify(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// Reads identity from headers set by a trusted reverse proxy.
#[derive(Debug, Clone)]
pub struct ForwardedHeaderIdentity {
    email_header: String,
    name_header: String,
}

impl ForwardedHeaderIdentity {
    pub fn new(email_header: impl Into<String>, name_header: impl Into<String>) -> Self {
        Self {
            email_header: email_header.into(),
            name_header: name_header.into(),
        }
    }

    fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

impl IdentityProvider for ForwardedHeaderIdentity {
    fn identify(&self, headers: &HeaderMap) -> Option<Identity> {
        let email = Self::header_text(headers, &self.email_header)?;
        Some(Identity {
            email,
            name: Self::header_text(headers, &self.name_header),
        })
    }
}
