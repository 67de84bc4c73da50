//! Data source coverage configuration
//!
//! This crate loads a YAML file describing a global analysis window and the
//! years each data source covers, and filters year-bearing sequences and
//! tables to those windows.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod mask;
pub mod table;
pub mod window;
