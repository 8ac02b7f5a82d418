use std::borrow::Cow;

use super::{pattern::Expression, CompiledPattern, MatchResult, Params};

impl CompiledPattern {
    /// Matches `path` against the pattern.
    ///
    /// Comparison of literal text ignores ASCII and Unicode case unless
    /// `case_sensitive` is set. A trailing slash and a trailing query string
    /// on the path are tolerated.
    pub fn match_path(&self, path: &str, case_sensitive: bool) -> MatchResult {
        if matches!(self.expression, Expression::Any) || self.pattern == path {
            return MatchResult::new(Params::unset(&self.param_names), String::new());
        }

        let Expression::Regex {
            sensitive,
            insensitive,
            ..
        } = &self.expression
        else {
            return MatchResult::no_match();
        };

        let splat = self.splat_slashes.map(|n| splat_after(path, n));

        let regex = if case_sensitive { sensitive } else { insensitive };
        let Some(caps) = regex.captures(path) else {
            return MatchResult::no_match();
        };

        let mut params = Params::default();
        for name in &self.param_names {
            let value = caps.name(name).map(|m| decode(m.as_str()));
            params.push(name.clone(), value);
        }

        MatchResult::new(params, splat.unwrap_or_default().to_owned())
    }
}

/// Returns the part of `path` after its `n`-th slash, or `""` if the path
/// has fewer slashes.
fn splat_after(path: &str, n: usize) -> &str {
    if n == 0 {
        return path;
    }
    match path.match_indices('/').nth(n - 1) {
        Some((idx, _)) => &path[idx + 1..],
        None => "",
    }
}

/// Form-style percent decoding that never fails: `+` is a space, malformed
/// escapes are kept as-is, invalid UTF-8 is replaced.
fn decode(raw: &str) -> String {
    let raw = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::router::matcher::compile;

    use super::{decode, splat_after};

    #[test]
    fn test_wildcard_pattern() {
        let compiled = compile("*").unwrap();
        for path in ["/", "", "/a/b/c", "anything?x=1"] {
            let m = compiled.match_path(path, true);
            assert!(m.is_match(), "{}", path);
            assert!(m.params().is_empty());
            assert_eq!(m.splat(), "");
        }
    }

    #[test]
    fn test_exact_literal() {
        let compiled = compile("/about/team").unwrap();
        let m = compiled.match_path("/about/team", true);
        assert!(m.is_match());
        assert!(m.params().is_empty());
        assert_eq!(m.splat(), "");

        assert!(!compiled.match_path("/about", true).is_match());
        assert!(!compiled.match_path("/about/team/x", true).is_match());
    }

    #[test]
    fn test_exact_literal_with_placeholder_keeps_names() {
        let compiled = compile("/user/@id").unwrap();
        let m = compiled.match_path("/user/@id", true);
        assert!(m.is_match());
        assert_eq!(m.params().get("id"), Some(None));
    }

    #[test]
    fn test_named_capture() {
        let compiled = compile("/user/@id").unwrap();

        let tests = ["/user/42", "/user/42/", "/user/42?tab=posts", "/user/42/?x"];
        for path in tests {
            let m = compiled.match_path(path, false);
            assert!(m.is_match(), "{}", path);
            assert_eq!(m.param("id"), Some("42"), "{}", path);
            assert_eq!(m.params().len(), 1);
        }

        for path in ["/user", "/user/", "/user/42/posts", "/users/42"] {
            assert!(!compiled.match_path(path, false).is_match(), "{}", path);
        }
    }

    #[test]
    fn test_constrained_capture() {
        let compiled = compile("/user/@id:[0-9]+").unwrap();
        assert_eq!(compiled.match_path("/user/42", false).param("id"), Some("42"));
        assert!(!compiled.match_path("/user/abc", false).is_match());
    }

    #[test]
    fn test_multiple_params() {
        let compiled = compile("/@name/@id:[0-9]{3}").unwrap();
        let m = compiled.match_path("/bob/123", false);
        assert!(m.is_match());
        assert_eq!(
            m.params().iter().collect::<Vec<_>>(),
            vec![("name", Some("bob")), ("id", Some("123"))]
        );
        assert!(!compiled.match_path("/bob/12345", false).is_match());
    }

    #[test]
    fn test_splat() {
        let compiled = compile("/files/*").unwrap();

        let tests = [
            ("/files/a/b/c", "a/b/c"),
            ("/files/", ""),
            ("/files", ""),
            ("/files/readme.md", "readme.md"),
            ("/files/a?x=1", "a?x=1"),
            ("/files/a/b/?x=1", "a/b/?x=1"),
        ];
        for (path, want) in tests {
            let m = compiled.match_path(path, false);
            assert!(m.is_match(), "{}", path);
            assert_eq!(m.splat(), want, "{}", path);
        }

        assert!(!compiled.match_path("/other/a", false).is_match());
        assert_eq!(compiled.match_path("/other/a", false).splat(), "");
    }

    #[test]
    fn test_splat_with_params() {
        let compiled = compile("/@bucket/*").unwrap();
        let m = compiled.match_path("/photos/2024/june.jpg", false);
        assert!(m.is_match());
        assert_eq!(m.param("bucket"), Some("photos"));
        assert_eq!(m.splat(), "2024/june.jpg");
    }

    #[test]
    fn test_optional_group_absent_param() {
        let compiled = compile("/blog(/@year(/@month(/@day)))").unwrap();

        let m = compiled.match_path("/blog/2024/05", false);
        assert!(m.is_match());
        assert_eq!(m.param("year"), Some("2024"));
        assert_eq!(m.param("month"), Some("05"));
        assert_eq!(m.params().get("day"), Some(None));
        assert_eq!(m.params().len(), 3);

        let m = compiled.match_path("/blog", false);
        assert!(m.is_match());
        assert_eq!(m.params().get("year"), Some(None));
        assert_eq!(m.params().get("unknown"), None);
    }

    #[test]
    fn test_empty_capture_is_not_absent() {
        let compiled = compile("/tag/@name:[a-z]*").unwrap();
        let m = compiled.match_path("/tag/", false);
        assert!(m.is_match());
        assert_eq!(m.params().get("name"), Some(Some("")));
    }

    #[test]
    fn test_case_sensitivity() {
        let compiled = compile("/Hello").unwrap();
        assert!(compiled.match_path("/hello", false).is_match());
        assert!(!compiled.match_path("/hello", true).is_match());
        assert!(compiled.match_path("/Hello", true).is_match());
    }

    #[test]
    fn test_trailing_slash_pattern() {
        let compiled = compile("/about/").unwrap();
        assert!(compiled.match_path("/about", false).is_match());
        assert!(compiled.match_path("/about/", false).is_match());
    }

    #[test]
    fn test_param_is_decoded() {
        let compiled = compile("/search/@q").unwrap();
        let tests = [
            ("/search/hello%20world", "hello world"),
            ("/search/a+b", "a b"),
            ("/search/1%2B1", "1+1"),
            ("/search/caf%C3%A9", "café"),
            ("/search/100%", "100%"),
            ("/search/%zz", "%zz"),
        ];
        for (path, want) in tests {
            assert_eq!(compiled.match_path(path, false).param("q"), Some(want), "{}", path);
        }
    }

    #[test]
    fn test_recompile_is_idempotent() {
        let patterns = ["/user/@id:[0-9]+", "/files/*", "/blog(/@year)", "/About/"];
        let paths = ["/user/7", "/user/x", "/files/a/b", "/blog", "/blog/1999", "/about"];

        for pattern in patterns {
            let fst = compile(pattern).unwrap();
            let snd = compile(pattern).unwrap();
            for path in paths {
                for case_sensitive in [true, false] {
                    assert_eq!(
                        fst.match_path(path, case_sensitive),
                        snd.match_path(path, case_sensitive)
                    );
                }
            }
        }
    }

    #[test]
    fn test_shared_across_threads() {
        let compiled = compile("/user/@id").unwrap();
        thread::scope(|s| {
            for i in 0..8 {
                let compiled = &compiled;
                s.spawn(move || {
                    let path = format!("/user/{}", i);
                    let m = compiled.match_path(&path, false);
                    assert_eq!(m.param("id"), Some(i.to_string().as_str()));
                });
            }
        });
    }

    #[test]
    fn test_splat_after() {
        let tests = [
            ("/a/b/c", 0, "/a/b/c"),
            ("/a/b/c", 1, "a/b/c"),
            ("/a/b/c", 2, "b/c"),
            ("/a/b/c", 3, "c"),
            ("/a/b/c", 4, ""),
        ];
        for (path, n, want) in tests {
            assert_eq!(splat_after(path, n), want);
        }
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert_eq!(decode("%FF"), "\u{FFFD}");
    }
}
