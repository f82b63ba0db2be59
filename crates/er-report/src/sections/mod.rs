//! Report section data structures.

pub mod binary;
pub mod exceptions;
pub mod general;
pub mod system;

pub use binary::BinarySection;
pub use exceptions::{ExceptionEntry, ExceptionsSection};
pub use general::GeneralSection;
pub use system::SystemInfoSection;
