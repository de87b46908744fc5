pub mod address;
pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod errors;
pub mod models;
pub mod scangroup;
pub mod services;
pub mod validation;

/// Crate version with the git revision when it was available at build time.
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("GIT_HASH"));
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
