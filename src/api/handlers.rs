//! Page handlers. Gated handlers receive the admitted identity through
//! request extensions.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Extension;
use serde::Deserialize;

use super::AppState;
use crate::error::Result;
use crate::identity::Identity;
use crate::pages::{self, Chrome, Page};

/// GET / — straight to the dashboard; the gate decides from there.
pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn signin(State(state): State<AppState>) -> Result<Html<String>> {
    let view = pages::signin(&state.config.signin_url, state.signout_url());
    state.renderer.render(Page::Signin, &view)
}

pub async fn denied(State(state): State<AppState>) -> Result<Html<String>> {
    let view = pages::denied(state.signout_url());
    state.renderer.render(Page::Denied, &view)
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>> {
    let announcements = state.announcements.announcements(&identity.email).await;
    let view = pages::dashboard(&identity, announcements, state.signout_url());
    state.renderer.render(Page::Dashboard, &view)
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>> {
    let record = state.data.profile(&identity.email).await;
    let view = pages::profile(&identity, record, state.signout_url());
    state.renderer.render(Page::Profile, &view)
}

pub async fn payroll(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>> {
    let records = state.data.payroll(&identity.email).await;
    let view = pages::payroll(records, state.signout_url());
    state.renderer.render(Page::Payroll, &view)
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    row: Option<String>,
}

/// GET /payroll/details?row=<key>
pub async fn payroll_details(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<DetailQuery>,
) -> Result<Response> {
    let records = match state.data.payroll(&identity.email).await {
        Ok(records) => records,
        Err(e) => {
            let view = pages::payroll(Err(e), state.signout_url());
            return Ok(state.renderer.render(Page::Payroll, &view)?.into_response());
        }
    };

    let row = query.row.unwrap_or_default();
    match pages::payroll_detail(records, &row, state.signout_url()) {
        Some(view) => Ok(state
            .renderer
            .render(Page::PayrollDetail, &view)?
            .into_response()),
        None => {
            let chrome = Chrome::new("Payroll record not found", "payroll", state.signout_url());
            let html = state.renderer.render(Page::PayrollMissing, &chrome)?;
            Ok((StatusCode::NOT_FOUND, html).into_response())
        }
    }
}

pub async fn contracts(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>> {
    let records = state.data.contracts(&identity.email).await;
    let view = pages::contracts(records, state.signout_url());
    state.renderer.render(Page::Contracts, &view)
}
