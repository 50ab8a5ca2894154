//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod csv_server;
pub mod fake_extractor;
