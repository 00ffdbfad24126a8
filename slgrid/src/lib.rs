//! Converts lists of map-viewer location URLs into absolute grid positions.
//!
//! Each record's region is resolved to its grid origin through the CAP
//! endpoint, with results cached on disk so a region is only ever looked up
//! once.

pub mod cache;
pub mod config;
pub mod error;
pub mod grid;
pub mod json_file;
pub mod lookup;
pub mod pipeline;
pub mod resolver;
pub mod slurl;
pub mod types;
