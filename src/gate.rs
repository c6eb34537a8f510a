//! Access gate
//!
//! Admission is a strict sequence, re-evaluated on every page render:
//!
//! 1. No identity on the request: send the user to `/signin`.
//! 2. Allowlist lookup fails, or finds no active entry: send to `/denied`.
//! 3. Otherwise the page renders.
//!
//! A failed lookup is indistinguishable from "not on the list".

use axum::response::Redirect;

use crate::identity::Identity;
use crate::upstream::{AllowlistEntry, PortalDataSource};

pub const SIGNIN_PATH: &str = "/signin";
pub const DENIED_PATH: &str = "/denied";

const DEFAULT_STATUS: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    SignInRequired,
    Denied,
    Authorized(Identity),
}

impl GateOutcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, GateOutcome::Authorized(_))
    }

    /// The admitted identity, or the redirect for a refusal.
    pub fn into_identity(self) -> Result<Identity, Redirect> {
        match self {
            GateOutcome::Authorized(identity) => Ok(identity),
            GateOutcome::SignInRequired => Err(Redirect::to(SIGNIN_PATH)),
            GateOutcome::Denied => Err(Redirect::to(DENIED_PATH)),
        }
    }
}

/// Whether `email` has an active allowlist entry.
///
/// The first entry whose email matches case-insensitively decides. A missing
/// or blank status counts as active.
pub fn is_active_member(entries: &[AllowlistEntry], email: &str) -> bool {
    let wanted = email.trim().to_lowercase();
    if wanted.is_empty() {
        return false;
    }

    let Some(entry) = entries.iter().find(|e| {
        e.email
            .as_deref()
            .is_some_and(|candidate| candidate.trim().to_lowercase() == wanted)
    }) else {
        return false;
    };

    let status = entry
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_STATUS);
    status.eq_ignore_ascii_case(DEFAULT_STATUS)
}

/// Run the gate for one request.
pub async fn admit(identity: Option<Identity>, source: &dyn PortalDataSource) -> GateOutcome {
    let Some(identity) = identity else {
        tracing::debug!("no identity on request, redirecting to sign-in");
        return GateOutcome::SignInRequired;
    };

    match source.allowed_users().await {
        Ok(entries) if is_active_member(&entries, &identity.email) => {
            tracing::debug!("admitted {}", identity.email);
            GateOutcome::Authorized(identity)
        }
        Ok(_) => {
            tracing::info!("denied {}: not an active allowlist member", identity.email);
            GateOutcome::Denied
        }
        Err(e) => {
            tracing::info!("denied {}: allowlist lookup failed: {}", identity.email, e);
            GateOutcome::Denied
        }
    }
}
