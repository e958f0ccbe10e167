pub mod clean;
mod command_result;
pub mod init;
pub mod validate;

pub use command_result::*;
