//! Fleetdesk, an infrastructure records API.
//!
//! CRUD over five resource types (servers, domains, email accounts, code
//! repositories, storage buckets) backed by DynamoDB, with an in-memory
//! backend for tests and local development. Domains carry a nested DNS
//! record sub-collection addressed by record id.

pub mod config;
pub mod dns;
pub mod error;
pub mod ids;
pub mod models;
pub mod patch;
pub mod routes;
pub mod service;
pub mod store;
