pub use matcher::{
    compile, method_matches, CompiledPattern, InvalidPatternError, MatchResult, Params,
    ANY_METHOD,
};
pub use route::{Handler, Route};

use tracing::{info, span, warn, Level};

mod matcher;
mod route;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterConfig {
    /// Compare literal pattern text case-sensitively. Off by default.
    pub case_sensitive: bool,
}

/// An ordered route table. Routes are tried in registration order and the
/// table is never reordered.
#[derive(Debug, Default)]
pub struct Router<'a> {
    routes: Vec<Route<'a>>,
    config: RouterConfig,
}

impl<'a> Router<'a> {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            routes: vec![],
            config,
        }
    }

    pub fn config(&self) -> RouterConfig {
        self.config
    }

    pub fn routes(&self) -> &[Route<'a>] {
        &self.routes
    }

    pub fn add_route<M: Into<String>>(
        &mut self,
        methods: impl IntoIterator<Item = M>,
        pattern: impl Into<String>,
        handler: &'a (impl Handler + Sync),
        pass_self: bool,
    ) -> Result<(), InvalidPatternError> {
        let pattern = pattern.into();
        let route = match Route::new(pattern.as_str(), methods, handler, pass_self) {
            Ok(route) => route,
            Err(err) => {
                warn!(%pattern, %err, "rejected route");
                return Err(err);
            }
        };
        self.routes.push(route);
        Ok(())
    }

    /// Registers a route written as `"GET|POST /path"`. Without a method
    /// prefix the route answers every method.
    pub fn map(
        &mut self,
        route_spec: &str,
        handler: &'a (impl Handler + Sync),
        pass_self: bool,
    ) -> Result<(), InvalidPatternError> {
        let route_spec = route_spec.trim();
        match route_spec.split_once(' ') {
            Some((methods, pattern)) => {
                let methods = methods
                    .split('|')
                    .map(|m| m.trim().to_uppercase())
                    .filter(|m| !m.is_empty());
                self.add_route(methods, pattern.trim(), handler, pass_self)
            }
            None => self.add_route([ANY_METHOD], route_spec, handler, pass_self),
        }
    }

    /// Every route answering `method` whose pattern matches `path`, in
    /// registration order.
    pub fn matches<'s, 'q>(
        &'s self,
        method: &'q str,
        path: &'q str,
    ) -> impl Iterator<Item = (&'s Route<'a>, MatchResult)> + 'q
    where
        's: 'q,
    {
        let case_sensitive = self.config.case_sensitive;
        self.routes
            .iter()
            .filter(move |route| route.match_method(method))
            .filter_map(move |route| {
                let m = route.match_path(path, case_sensitive);
                m.is_match().then_some((route, m))
            })
    }

    pub fn route(&self, method: &str, path: &str) -> Option<(&Route<'a>, MatchResult)> {
        let case_sensitive = self.config.case_sensitive;
        self.routes
            .iter()
            .filter(|route| route.match_method(method))
            .find_map(|route| {
                let m = route.match_path(path, case_sensitive);
                m.is_match().then_some((route, m))
            })
    }

    /// Methods of the routes whose pattern matches `path`, regardless of the
    /// request method. Empty when no pattern matches.
    pub fn allowed_methods(&self, path: &str) -> Vec<&str> {
        let mut allowed: Vec<&str> = vec![];
        for route in &self.routes {
            if !route.match_path(path, self.config.case_sensitive).is_match() {
                continue;
            }
            for method in route.methods() {
                if !allowed.contains(&method.as_str()) {
                    allowed.push(method);
                }
            }
        }
        allowed
    }

    /// Runs the handlers of matching routes until one of them does not pass.
    /// Returns `false` if no route matched.
    pub fn dispatch(&self, method: &str, path: &str) -> bool {
        let span = span!(Level::INFO, "route", method, path);
        let _guard = span.enter();

        let mut dispatched = false;
        for (route, m) in self.matches(method, path) {
            info!("match: {}", route.pattern());
            dispatched = true;
            let this = route.pass_self().then_some(route);
            if !route.handler().handle(&m, this) {
                break;
            }
        }

        if !dispatched {
            info!("no match");
        }
        dispatched
    }
}
