//! REST service storing notification records in SQLite.

pub mod api;
pub mod config;
pub mod db;

#[cfg(test)]
mod config_test;
