mod proximity;
mod vessel;

pub use proximity::*;
pub use vessel::*;
