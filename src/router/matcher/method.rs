pub const ANY_METHOD: &str = "*";

/// Reports whether `method` is allowed by `methods`.
///
/// Both sides are compared as given; callers normalize case beforehand.
pub fn method_matches<S: AsRef<str>>(methods: &[S], method: &str) -> bool {
    methods
        .iter()
        .map(|m| m.as_ref())
        .any(|m| m == method || m == ANY_METHOD)
}
