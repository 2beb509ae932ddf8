//! CLI commands implementation

pub mod init;
pub mod load;
pub mod report;
pub mod status;

pub use init::*;
pub use load::*;
pub use report::*;
pub use status::*;
