mod clock;
mod selection;
mod session;

pub use clock::*;
pub use selection::*;
pub use session::*;
