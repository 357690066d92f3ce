//! Seni driver.
//!
//! Ties the phases together for the worker job contract ([`handle_job`]) and
//! the `seni` command-line tool.
//!
//! ```text
//! script ─ lex ─ parse ─┬─ compile ─ evaluate        (RENDER)
//!                       ├─ build_traits ─ genotypes  (BUILD_TRAITS, *_GENERATION)
//!                       └─ unparse                   (UNPARSE)
//! ```

pub mod commands;
pub mod config;
pub mod jobs;
pub mod pipeline;
pub mod render;

use std::sync::Once;

pub use config::{Config, ConfigError};
pub use jobs::{handle_job, GeneValue, Job, JobError, JobResponse};
pub use pipeline::{compile_script, front_ast, ScriptError};
pub use render::{render, MatrixStack, Rendering};

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber, logging to stderr.
///
/// `RUST_LOG` wins over `default_filter`. Only the first call has any effect.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
        if installed.is_err() {
            tracing::debug!("a tracing subscriber was already installed");
        }
    });
}
