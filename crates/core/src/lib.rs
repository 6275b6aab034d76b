//! # HMS Core
//!
//! Client core for the hospital management backend.
//!
//! This crate contains everything between a front end and the REST API:
//! - Domain entities and the repository traits that fetch and mutate them
//! - An authenticated JSON client that classifies every failure as an [`ApiError`]
//! - HTTP repositories, application services and the NRC / address codecs
//! - A token-keyed [`Container`] and the [`AppServices`] composition root
//! - Generation-guarded presentation [`hooks`]
//!
//! **No UI concerns**: rendering, routing and terminal output belong to front ends such as
//! the `hms` binary.

pub mod config;
pub mod constants;
pub mod container;
pub mod domain;
pub mod error;
pub mod hooks;
pub mod http;
pub mod repositories;
pub mod services;
pub mod token;
pub mod wiring;

#[cfg(test)]
mod test_support;

pub use config::{ClientConfig, FallbackPolicy};
pub use container::{Container, Resolver, ServiceToken};
pub use error::{ApiError, ApiErrorKind, ApiResult, ConfigError, WiringError};
pub use http::ApiClient;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use wiring::AppServices;
