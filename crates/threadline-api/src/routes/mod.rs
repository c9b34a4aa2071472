//! Route table and handlers.

pub mod data;
pub mod login;
pub mod submissions;

use http::Method;

/// A recognised API path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/api/data/:key`
    Data(String),
    /// `/api/auth/login`
    Login,
    /// `/api/auth/logout`
    Logout,
    /// `/api/quotes`
    Quotes,
}

impl Route {
    /// Match a request path. Trailing slashes are ignored.
    pub fn resolve(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        match path {
            "/api/auth/login" => Some(Route::Login),
            "/api/auth/logout" => Some(Route::Logout),
            "/api/quotes" => Some(Route::Quotes),
            _ => path
                .strip_prefix("/api/data/")
                .filter(|key| !key.is_empty() && !key.contains('/'))
                .map(|key| Route::Data(key.to_string())),
        }
    }

    pub fn allowed_methods(&self) -> &'static [Method] {
        match self {
            Route::Data(_) | Route::Quotes => &[Method::GET, Method::POST],
            Route::Login | Route::Logout => &[Method::POST],
        }
    }

    /// `Allow` header value.
    pub fn allow_header(&self) -> String {
        self.allowed_methods()
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
