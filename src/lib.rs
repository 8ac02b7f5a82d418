//! Route pattern compilation and matching for HTTP request routers.
//!
//! A pattern such as `/user/@id:[0-9]+` or `/files/*` is compiled once into
//! an anchored regular expression; matching a path returns a fresh
//! [`MatchResult`] holding the decoded parameters and the splat.

pub use router::{
    compile, method_matches, CompiledPattern, Handler, InvalidPatternError, MatchResult, Params,
    Route, Router, RouterConfig, ANY_METHOD,
};

mod router;

#[cfg(test)]
mod test_utils;
