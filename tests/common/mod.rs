//! Shared test utilities
//!
//! Each integration test file pulls these in with `mod common;`, so not
//! every helper is used by every file.

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod database;
pub mod fixtures;
