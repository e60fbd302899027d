//! Core domain model: usage profiles, observation vocabulary, error types.

pub mod errors;
pub mod profile;
