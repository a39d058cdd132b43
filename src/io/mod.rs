pub mod input;
pub mod naming;
pub mod output;
pub mod xlsx;

pub use input::*;
pub use naming::*;
pub use output::*;
pub use xlsx::*;
