//! The URL contract: one query parameter, `tab`, whose only legal value is
//! `"map"`. Anything else is treated as absent rather than an error, so
//! stale or hand-edited links degrade gracefully.

/// The mobile view indicated by the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Map,
}

impl Tab {
    /// Interprets a raw `tab` parameter value.
    pub fn from_param(value: Option<&str>) -> Option<Tab> {
        match value {
            Some("map") => Some(Tab::Map),
            _ => None,
        }
    }

    /// Extracts the tab from a raw query string (with or without a leading
    /// `?`), e.g. `"tab=map&utm=x"`.
    pub fn from_query(query: &str) -> Option<Tab> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let value = query.split('&').find_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some("tab"), Some(value)) => Some(value),
                _ => None,
            }
        });
        Tab::from_param(value)
    }

    /// The query string encoding this tab.
    pub fn as_query(&self) -> &'static str {
        match self {
            Tab::Map => "tab=map",
        }
    }
}

/// A navigation the view layer wants performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    /// Rewrite to the bare path, dropping the tab parameter. Routers must
    /// perform this without a reload and without scrolling to top.
    ClearTab,
    /// Navigate to the given tab.
    SetTab(Tab),
}

/// Boundary to whatever owns the address bar.
pub trait Router {
    /// The currently active tab, computed fresh from the URL.
    fn tab(&self) -> Option<Tab>;

    /// Applies a navigation.
    fn apply(&mut self, action: RouteAction);
}

/// In-memory router for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryRouter {
    tab: Option<Tab>,
    applied: Vec<RouteAction>,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a raw query string, as a shared link would.
    pub fn from_query(query: &str) -> Self {
        Self {
            tab: Tab::from_query(query),
            applied: Vec::new(),
        }
    }

    /// Every action applied so far, oldest first.
    pub fn applied(&self) -> &[RouteAction] {
        &self.applied
    }
}

impl Router for MemoryRouter {
    fn tab(&self) -> Option<Tab> {
        self.tab
    }

    fn apply(&mut self, action: RouteAction) {
        self.tab = match action {
            RouteAction::ClearTab => None,
            RouteAction::SetTab(tab) => Some(tab),
        };
        self.applied.push(action);
    }
}

/// Router backed by the browser history API. `replace_state` rewrites the
/// address bar without a reload and preserves the scroll position.
#[cfg(feature = "wasm")]
pub struct BrowserRouter;

#[cfg(feature = "wasm")]
impl BrowserRouter {
    pub fn new() -> Self {
        Self
    }

    fn location() -> Option<web_sys::Location> {
        web_sys::window().map(|window| window.location())
    }

    fn rewrite(url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(history) = window.history() else {
            return;
        };
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url));
    }
}

#[cfg(feature = "wasm")]
impl Default for BrowserRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "wasm")]
impl Router for BrowserRouter {
    fn tab(&self) -> Option<Tab> {
        Self::location()
            .and_then(|location| location.search().ok())
            .as_deref()
            .and_then(Tab::from_query)
    }

    fn apply(&mut self, action: RouteAction) {
        let path = Self::location()
            .and_then(|location| location.pathname().ok())
            .unwrap_or_else(|| "/".to_string());

        match action {
            RouteAction::ClearTab => Self::rewrite(&path),
            RouteAction::SetTab(tab) => Self::rewrite(&format!("{path}?{}", tab.as_query())),
        }
    }
}
