//! Kiln host: the `kiln` command-line driver and the pieces it is built from.
//!
//! A [`Session`] owns an interpreter with the host built-ins installed and
//! runs source text through lex, parse, feed and execute. [`run_repl`] wraps
//! a session in a line-oriented loop.

mod builtins;
mod diagnostics;
mod output;
mod repl;
mod session;

use std::sync::Once;

pub use builtins::HostFlags;
pub use diagnostics::render;
pub use output::ConsoleOutput;
pub use repl::{run_repl, PROMPT};
pub use session::{RunError, Session};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set.
///
/// Safe to call more than once; only the first call does anything.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::EnvFilter;

        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
            .init();
    });
}
