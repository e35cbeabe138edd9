//! Routes and route changes

use std::fmt;
use std::sync::Mutex;

use uuid::Uuid;

/// Front-end routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Events,
    FilterEvents,
    ViewEvent(Uuid),
    CreateEvent,
    EditEvent(Uuid),
    MyEvents,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/cadastro".to_string(),
            Route::Home => "/".to_string(),
            Route::Events => "/eventos".to_string(),
            Route::FilterEvents => "/evento/buscar".to_string(),
            Route::ViewEvent(id) => format!("/evento/{}", id),
            Route::CreateEvent => "/evento/criar".to_string(),
            Route::EditEvent(id) => format!("/evento/editar/{}", id),
            Route::MyEvents => "/evento/minha-agenda".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Performs route changes on behalf of views and the HTTP client
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that remembers every route it was sent to
#[derive(Default)]
pub struct History {
    visited: Mutex<Vec<Route>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.visited.lock().ok().and_then(|v| v.last().cloned())
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = %route, "Navigating");
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(route);
        }
    }
}
