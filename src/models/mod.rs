pub mod history;
pub mod result;

pub use history::*;
pub use result::*;
