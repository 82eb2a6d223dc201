//! Shared test infrastructure

pub mod mocks;
