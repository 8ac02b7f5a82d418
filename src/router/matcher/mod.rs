pub use method::{method_matches, ANY_METHOD};
pub use pattern::{compile, CompiledPattern, InvalidPatternError};

mod method;
mod path;
mod pattern;

/// Parameters captured by a match, in declaration order.
///
/// Every name the pattern declares is present; a name whose placeholder did
/// not take part in the match maps to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, Option<String>)>);

impl Params {
    fn unset(names: &[String]) -> Self {
        Self(names.iter().map(|name| (name.clone(), None)).collect())
    }

    fn push(&mut self, name: String, value: Option<String>) {
        self.0.push((name, value));
    }

    /// `None` if the name is not declared, `Some(None)` if it is declared but absent.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    matched: bool,
    params: Params,
    splat: String,
}

impl MatchResult {
    fn new(params: Params, splat: String) -> Self {
        Self {
            matched: true,
            params,
            splat,
        }
    }

    fn no_match() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.matched
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Shorthand for `params().get(name)` flattened: `None` when absent or undeclared.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).flatten()
    }

    pub fn splat(&self) -> &str {
        &self.splat
    }
}
