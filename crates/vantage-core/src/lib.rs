//! Worker-side execution core of the Vantage browser-testing framework.
//!
//! This crate owns the innermost execution primitive: running a single test
//! or hook body ("runnable") against a live browser session, with timeout
//! racing, an interactive-session drop-in point for debugging, and
//! screenshot enrichment of failures. A process-wide registry exposes which
//! context is currently executing on each browser session so command-step
//! instrumentation can attribute in-flight driver activity to a test.
//!
//! Scheduling across runnables, browser-session pooling, retry policy and
//! result reporting live in the surrounding orchestration crates; they reach
//! this crate only through the collaborator traits in [`browser`] and
//! [`screenshot`].

pub mod browser;
pub mod config;
pub mod engine;
pub mod errors;
pub mod model;
pub mod registry;
pub mod screenshot;

pub use config::{ReplMode, RuntimeConfig};
pub use engine::{ExecutionContext, ExecutionEngine};
pub use errors::{ExecutionError, ExecutionErrorKind};
pub use model::{
    AssertViewOutcome, AssertViewResults, Runnable, RunnableKind, SharedRunContext, Test,
};
pub use registry::ExecutionContextRegistry;
pub use screenshot::{PageScreenshot, Screenshooter};
