pub mod cs;

pub use cs::ecc::Result;
pub use cs::{ecc, error};
pub use error::Error;
