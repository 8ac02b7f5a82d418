use crate::router::{Handler, MatchResult, Route};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn noop_handler() -> impl Handler + Sync {
    fn noop(_: &MatchResult, _: Option<&Route<'_>>) -> bool {
        false
    }
    noop
}
