use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::debug;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"@(\w+)(?::([^/()]*))?").unwrap();
}

const DEFAULT_CLASS: &str = r"[^/\?]+";
const QUERY_SUFFIX: &str = r"(?:\?.*)?";

#[derive(Error, Debug)]
pub enum InvalidPatternError {
    #[error("invalid placeholder name @{name}: must start with a letter or underscore")]
    Name { name: String },
    #[error("invalid constraint for placeholder @{name}: {source}")]
    Constraint {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid pattern {pattern:?}: {source}")]
    Expression {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
pub(super) enum Expression {
    Any,
    Regex {
        source: String,
        sensitive: Regex,
        insensitive: Regex,
    },
}

/// A pattern translated into an anchored regular expression, together with
/// the names of the parameters it declares.
///
/// Built once per route and shared read-only by every match.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub(super) pattern: String,
    pub(super) expression: Expression,
    pub(super) param_names: Vec<String>,
    pub(super) splat_slashes: Option<usize>,
}

impl CompiledPattern {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The anchored expression source, `None` for the `*` pattern.
    pub fn expression(&self) -> Option<&str> {
        match &self.expression {
            Expression::Any => None,
            Expression::Regex { source, .. } => Some(source),
        }
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Number of slashes preceding the splat, `None` unless the pattern ends in `*`.
    pub fn splat_slashes(&self) -> Option<usize> {
        self.splat_slashes
    }
}

pub fn compile(pattern: impl Into<String>) -> Result<CompiledPattern, InvalidPatternError> {
    let pattern = pattern.into();
    if pattern == "*" {
        return Ok(CompiledPattern {
            pattern,
            expression: Expression::Any,
            param_names: vec![],
            splat_slashes: None,
        });
    }

    let splat_slashes = pattern
        .ends_with('*')
        .then(|| pattern.matches('/').count());

    let rewritten = pattern.replace(')', ")?").replace("/*", "(/?|/.*?)");

    let mut param_names: Vec<String> = vec![];
    let mut body = String::with_capacity(rewritten.len() * 2);
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(&rewritten) {
        let whole = caps.get(0).unwrap();
        let name = &caps[1];
        let constraint = caps.get(2).map(|c| c.as_str());

        if !name.starts_with(|c: char| c == '_' || c.is_alphabetic()) {
            return Err(InvalidPatternError::Name {
                name: name.to_owned(),
            });
        }
        if let Some(constraint) = constraint {
            if let Err(source) = Regex::new(constraint) {
                return Err(InvalidPatternError::Constraint {
                    name: name.to_owned(),
                    source,
                });
            }
        }
        let class = constraint.unwrap_or(DEFAULT_CLASS);

        body.push_str(&rewritten[last..whole.start()]);
        if param_names.iter().any(|n| n == name) {
            body.push_str(&format!("(?:{})", class));
        } else {
            body.push_str(&format!("(?P<{}>{})", name, class));
            param_names.push(name.to_owned());
        }
        last = whole.end();
    }
    body.push_str(&rewritten[last..]);

    // a trailing slash on the path is always optional
    if body.ends_with('/') {
        body.pop();
    }
    let source = format!("^{}/?{}$", body, QUERY_SUFFIX);

    let build = |case_insensitive: bool| {
        RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|source| InvalidPatternError::Expression {
                pattern: pattern.clone(),
                source,
            })
    };
    let sensitive = build(false)?;
    let insensitive = build(true)?;

    debug!(%pattern, expression = %source, "compiled");

    Ok(CompiledPattern {
        pattern,
        expression: Expression::Regex {
            source,
            sensitive,
            insensitive,
        },
        param_names,
        splat_slashes,
    })
}
