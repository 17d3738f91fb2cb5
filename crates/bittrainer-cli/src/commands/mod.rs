pub mod explain;
pub mod init;
pub mod list_ops;
pub mod practice;
pub mod validate;
