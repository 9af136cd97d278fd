//! Terminal front end for the spy cats API.
//!
//! `app` holds the clap surface and one-shot commands, `shell` the
//! interactive session, `render` the text output, `transport` the ureq
//! executor and `config` the settings layers.

pub mod app;
pub mod config;
pub mod render;
pub mod shell;
pub mod transport;

pub use app::{execute, Cli, Command};
pub use config::{load_settings, Settings};
pub use transport::UreqTransport;
