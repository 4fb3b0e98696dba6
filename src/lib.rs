#![warn(clippy::pedantic)]
#![allow(
    clippy::len_without_is_empty,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::too_many_lines
)]

pub mod catalog;
pub mod distribution;
pub mod error;
pub mod file_io;
pub mod numerics;
pub mod plot;
pub mod sampling;

pub use error::{Error, Result};
