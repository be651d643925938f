//! Calling layer for the bazaar facet engine.
//!
//! Loads listing and wanted-request corpora, validates them, turns query
//! parameters into filter sets, and renders search and facet reports. The
//! `bazaar` binary is a thin wrapper over [`cli::run`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod params;
pub mod records;
