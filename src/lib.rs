/// SpaceX launch explorer library
// Mock login, a filterable launch list and a launch detail view over the
// public SpaceX REST API, served as JSON.
pub mod auth;
pub mod clients;
pub mod config;
pub mod detail;
pub mod domain;
pub mod errors;
pub mod guard;
pub mod handlers;
pub mod listing;
pub mod notices;
pub mod routes;
pub mod services;
pub mod utils;

#[cfg(test)]
mod testing;
