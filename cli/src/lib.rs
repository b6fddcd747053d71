//! cascade-cli library, exposing the command modules for unit tests.

pub mod commands;
