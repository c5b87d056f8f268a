//! Line-level parsing shared by the converters.
//!
//! These modules hold the pure pieces: regexes, per-line parsing, segmentation
//! and linking. File I/O and table output live in [`crate::parsers`].

#[cfg(feature = "whatsapp")]
pub mod whatsapp;

#[cfg(feature = "movie-script")]
pub mod movie_script;

