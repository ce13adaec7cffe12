//! Report generation module.
//!
//! Serializes a finished [`crate::types::DataProfile`] to JSON and writes
//! the missing-data report file for downstream consumers.
//!
//! # Example
//!
//! ```rust,ignore
//! use tablescope_profiling::reporting::ReportGenerator;
//! use std::path::PathBuf;
//!
//! let generator = ReportGenerator::new(PathBuf::from("outputs"), None);
//! let path = generator.write_profile_report(&profile, "train")?;
//! println!("report at {}", path.display());
//! ```

mod generator;

pub use generator::ReportGenerator;
