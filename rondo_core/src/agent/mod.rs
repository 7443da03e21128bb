mod actor;
mod identifier;
mod policy;
mod roster;

pub use actor::*;
pub use identifier::*;
pub use policy::*;
pub use roster::*;
