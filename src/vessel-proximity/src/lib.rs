#![deny(warnings)]
#![deny(rust_2018_idioms)]

pub mod error;
pub mod models;
pub mod settings;
pub mod sink;
pub mod source;
pub mod startup;
pub mod visualizer;

pub use error::{Error, Result};
