//! roster-dash library
//!
//! Client, filter state and dashboard session for a remote football player
//! roster service.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod external;
pub mod filters;
pub mod import;
pub mod logger;
pub mod models;
pub mod pagination;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
