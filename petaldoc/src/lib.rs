//! petaldoc: documentation generator for DaisyUI-styled Avalonia control
//! libraries.
//!
//! The binary is a thin wrapper over [`pipeline`]; the library exposes the
//! same pieces for integration tests and for `xtask`, which builds shell
//! completions and a man page from [`cli::Cli`].
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
