pub mod market;
pub mod sector;
pub mod signals;

pub use market::*;
pub use sector::*;
pub use signals::*;
