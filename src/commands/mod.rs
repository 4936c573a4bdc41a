pub mod changes;
pub mod hook;
pub mod init;
pub mod log_entry;
pub mod report;
pub mod reset;
pub mod status;
pub mod validate;

pub use changes::*;
pub use hook::*;
pub use init::*;
pub use log_entry::*;
pub use report::*;
pub use reset::*;
pub use status::*;
pub use validate::*;
