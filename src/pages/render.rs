//! Handlebars page rendering
//!
//! Templates are compiled into the binary and registered once at startup.
//! Every page template wraps itself in the `layout` partial block; formatted
//! cells go through the `display` partial, which switches on the
//! [`DisplayValue`](crate::format::DisplayValue) kind.

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

const LAYOUT: &str = include_str!("../../templates/layout.hbs");
const DISPLAY: &str = include_str!("../../templates/display.hbs");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Signin,
    Denied,
    Dashboard,
    Profile,
    Payroll,
    PayrollDetail,
    PayrollMissing,
    Contracts,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Signin,
        Page::Denied,
        Page::Dashboard,
        Page::Profile,
        Page::Payroll,
        Page::PayrollDetail,
        Page::PayrollMissing,
        Page::Contracts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Page::Signin => "signin",
            Page::Denied => "denied",
            Page::Dashboard => "dashboard",
            Page::Profile => "profile",
            Page::Payroll => "payroll",
            Page::PayrollDetail => "payroll_detail",
            Page::PayrollMissing => "payroll_missing",
            Page::Contracts => "contracts",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Page::Signin => include_str!("../../templates/signin.hbs"),
            Page::Denied => include_str!("../../templates/denied.hbs"),
            Page::Dashboard => include_str!("../../templates/dashboard.hbs"),
            Page::Profile => include_str!("../../templates/profile.hbs"),
            Page::Payroll => include_str!("../../templates/payroll.hbs"),
            Page::PayrollDetail => include_str!("../../templates/payroll_detail.hbs"),
            Page::PayrollMissing => include_str!("../../templates/payroll_missing.hbs"),
            Page::Contracts => include_str!("../../templates/contracts.hbs"),
        }
    }
}

pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_partial("layout", LAYOUT)?;
        handlebars.register_partial("display", DISPLAY)?;
        for page in Page::ALL {
            handlebars.register_template_string(page.name(), page.source())?;
        }
        Ok(Self { handlebars })
    }

    pub fn render<T: Serialize>(&self, page: Page, view: &T) -> Result<Html<String>> {
        let html = self.handlebars.render(page.name(), view)?;
        Ok(Html(html))
    }
}
