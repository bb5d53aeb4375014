//! Batch file reading in parallel and sequential styles
//!
//! A [`batch::BatchFileReader`] reads a [`domain::BatchRequest`] through any
//! [`io::ResourceReader`], reporting to a [`batch::BatchObserver`] under an
//! [`batch::ErrorPolicy`]. The `app` module wraps this in the demonstration
//! CLI.

pub mod app;
pub mod batch;
pub mod domain;
pub mod io;
pub mod prelude;
