mod clock;
mod multi_agent;
mod writer;

pub use clock::*;
pub use multi_agent::*;
pub use writer::*;
