use std::fmt;

use super::matcher::{self, CompiledPattern, InvalidPatternError, MatchResult};

pub trait Handler {
    /// Handles a matched request. Returning `true` passes the request on to
    /// the next matching route.
    fn handle(&self, m: &MatchResult, route: Option<&Route<'_>>) -> bool;
}

impl<T> Handler for T
where
    T: Fn(&MatchResult, Option<&Route<'_>>) -> bool,
{
    fn handle(&self, m: &MatchResult, route: Option<&Route<'_>>) -> bool {
        self(m, route)
    }
}

/// A pattern bound to the methods it answers and the handler it dispatches to.
///
/// The pattern is compiled on construction and never changes afterwards, so a
/// route can be matched from many threads at once.
pub struct Route<'a> {
    compiled: CompiledPattern,
    methods: Vec<String>,
    handler: &'a (dyn Handler + Sync),
    pass_self: bool,
}

impl<'a> Route<'a> {
    pub fn new<M: Into<String>>(
        pattern: impl Into<String>,
        methods: impl IntoIterator<Item = M>,
        handler: &'a (impl Handler + Sync),
        pass_self: bool,
    ) -> Result<Self, InvalidPatternError> {
        let compiled = matcher::compile(pattern)?;

        let mut deduped: Vec<String> = vec![];
        for method in methods {
            let method = method.into();
            if !deduped.contains(&method) {
                deduped.push(method);
            }
        }

        Ok(Self {
            compiled,
            methods: deduped,
            handler,
            pass_self,
        })
    }

    pub fn pattern(&self) -> &str {
        self.compiled.pattern()
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn compiled(&self) -> &CompiledPattern {
        &self.compiled
    }

    pub fn handler(&self) -> &'a (dyn Handler + Sync) {
        self.handler
    }

    /// Whether the dispatcher hands this route to its handler.
    pub fn pass_self(&self) -> bool {
        self.pass_self
    }

    pub fn match_method(&self, method: &str) -> bool {
        matcher::method_matches(&self.methods, method)
    }

    pub fn match_path(&self, path: &str, case_sensitive: bool) -> MatchResult {
        self.compiled.match_path(path, case_sensitive)
    }
}

impl fmt::Debug for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern())
            .field("methods", &self.methods)
            .field("pass_self", &self.pass_self)
            .finish_non_exhaustive()
    }
}
