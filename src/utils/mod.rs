mod display;
mod logging;

pub use display::*;
pub use logging::*;
