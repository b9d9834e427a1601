mod command_result;
pub mod domains;
pub mod helper;
pub mod import;
pub mod init;
pub mod list;

pub use command_result::*;
