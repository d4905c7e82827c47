pub mod error;
pub mod filesystem;
pub mod integrity;
pub mod result;
pub mod visitor;

pub use error::*;
pub use filesystem::*;
pub use integrity::*;
pub use result::*;
pub use visitor::*;
