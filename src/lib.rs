//! # Raster restoration tool
#![warn(missing_docs)]

pub mod cli;
