// src/application/router.rs
use crate::constants::{LOGIN_PATH, TOKEN_KEY};
use crate::domain::route::default_routes;
use crate::domain::{Route, RouteError, View};
use crate::ports::{Navigator, Storage};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

pub type Params = BTreeMap<String, String>;

/// Where the router currently points.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub path: String,
    pub name: &'static str,
    pub view: View,
    pub params: Params,
}

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub location: Location,
    /// Path that was requested when the guard sent us elsewhere.
    pub redirected_from: Option<String>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// A matched route together with its ancestors, outermost first.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub matched: Vec<&'a Route>,
    pub params: Params,
}

impl Resolved<'_> {
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|r| r.requires_auth)
    }

    fn leaf(&self) -> &Route {
        self.matched
            .last()
            .copied()
            .expect("a resolved chain always has a leaf")
    }
}

pub struct Router {
    routes: Vec<Route>,
    current: Mutex<Option<Location>>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            current: Mutex::new(None),
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Route> {
        fn walk<'a>(routes: &'a [Route], name: &str) -> Option<&'a Route> {
            routes.iter().find_map(|r| {
                if r.name == name {
                    Some(r)
                } else {
                    walk(&r.children, name)
                }
            })
        }
        walk(&self.routes, name)
    }

    pub fn resolve(&self, path: &str) -> Option<Resolved<'_>> {
        let segments = split_path(path);
        match_routes(&self.routes, &[], &segments)
    }

    /// Navigate to `path`, running the authentication guard first.
    #[instrument(level = "debug", skip(self, storage))]
    pub fn push(&self, path: &str, storage: &dyn Storage) -> Result<Navigation, RouteError> {
        let resolved = self
            .resolve(path)
            .ok_or_else(|| RouteError::NotFound(path.to_string()))?;

        if resolved.requires_auth() && !has_token(storage) {
            info!(path, "Route requires authentication, redirecting to login");
            let location = self.locate(LOGIN_PATH)?;
            self.set_current(location.clone());
            return Ok(Navigation {
                location,
                redirected_from: Some(path.to_string()),
            });
        }

        let location = to_location(path, &resolved);
        debug!(name = location.name, "Navigation allowed");
        self.set_current(location.clone());
        Ok(Navigation {
            location,
            redirected_from: None,
        })
    }

    pub fn current(&self) -> Option<Location> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn locate(&self, path: &str) -> Result<Location, RouteError> {
        self.resolve(path)
            .map(|resolved| to_location(path, &resolved))
            .ok_or_else(|| RouteError::NotFound(path.to_string()))
    }

    fn set_current(&self, location: Location) {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(location);
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(default_routes())
    }
}

impl Navigator for Router {
    fn hard_redirect(&self, path: &str) {
        match self.locate(path) {
            Ok(location) => {
                info!(path, "Hard redirect");
                self.set_current(location);
            }
            Err(e) => warn!(error = %e, "Hard redirect to unknown path ignored"),
        }
    }
}

fn has_token(storage: &dyn Storage) -> bool {
    match storage.get_item(TOKEN_KEY) {
        Ok(token) => token.is_some_and(|t| !t.is_empty()),
        Err(e) => {
            warn!(error = %e, "Could not read token, treating as logged out");
            false
        }
    }
}

fn to_location(path: &str, resolved: &Resolved<'_>) -> Location {
    let leaf = resolved.leaf();
    Location {
        path: path.to_string(),
        name: leaf.name,
        view: leaf.view,
        params: resolved.params.clone(),
    }
}

/// Path segments with query string, fragment and empty segments dropped.
fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_routes<'a>(
    routes: &'a [Route],
    prefix: &[&'a str],
    segments: &[&str],
) -> Option<Resolved<'a>> {
    for route in routes {
        let mut pattern = prefix.to_vec();
        pattern.extend(split_path(route.path));

        // Deepest match wins, so children are tried before the parent itself
        if let Some(mut child) = match_routes(&route.children, &pattern, segments) {
            child.matched.insert(0, route);
            return Some(child);
        }

        if let Some(params) = match_pattern(&pattern, segments) {
            return Some(Resolved {
                matched: vec![route],
                params,
            });
        }
    }
    None
}

fn match_pattern(pattern: &[&str], segments: &[&str]) -> Option<Params> {
    if pattern.len() != segments.len() {
        return None;
    }

    let mut params = Params::new();
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), (*actual).to_string());
            }
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}
