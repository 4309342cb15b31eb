use std::fmt;

use crate::content::{MobileApp, Portfolio};

const APPS_PREFIX: &str = "/ios-apps/";
const POLICY_SUFFIX: &str = "privacy-policy";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    AppDetails { id: String },
    PrivacyPolicy { id: String },
}

impl Route {
    /// Unknown paths fall back to home.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let Some(rest) = trimmed.strip_prefix(APPS_PREFIX) else {
            return Route::Home;
        };
        let mut segments = rest.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (Some(id), None, None) => Route::AppDetails { id: id.to_string() },
            (Some(id), Some(POLICY_SUFFIX), None) => Route::PrivacyPolicy { id: id.to_string() },
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::AppDetails { id } => format!("{APPS_PREFIX}{id}"),
            Route::PrivacyPolicy { id } => format!("{APPS_PREFIX}{id}/{POLICY_SUFFIX}"),
        }
    }

    /// Where "back" leads from here.
    pub fn parent(&self) -> Option<Route> {
        match self {
            Route::Home => None,
            Route::AppDetails { .. } => Some(Route::Home),
            Route::PrivacyPolicy { id } => Some(Route::AppDetails { id: id.clone() }),
        }
    }

    pub fn resolve<'a>(&self, portfolio: &'a Portfolio) -> Result<Resolved<'a>, NotFound> {
        match self {
            Route::Home => Ok(Resolved::Home),
            Route::AppDetails { id } => portfolio.app(id).map(Resolved::App).ok_or(NotFound::App),
            Route::PrivacyPolicy { id } => {
                let app = portfolio.app(id).ok_or(NotFound::App)?;
                let policy = app.privacy_policy.as_deref();
                let markdown = policy.ok_or(NotFound::PrivacyPolicy)?;
                Ok(Resolved::PrivacyPolicy { app, markdown })
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Resolved<'a> {
    Home,
    App(&'a MobileApp),
    PrivacyPolicy {
        app: &'a MobileApp,
        markdown: &'a str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotFound {
    App,
    PrivacyPolicy,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFound::App => f.write_str("App not found"),
            NotFound::PrivacyPolicy => f.write_str("Privacy Policy not found"),
        }
    }
}
