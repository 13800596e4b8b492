#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod distance_matrix;
mod domain;
mod error;
mod ports;
mod proximity;

pub use distance_matrix::*;
pub use domain::*;
pub use error::{Error, Result, RowError};
pub use ports::*;
pub use proximity::*;
