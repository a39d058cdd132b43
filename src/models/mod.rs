pub mod diagnostics;
pub mod record;

pub use diagnostics::*;
pub use record::*;
