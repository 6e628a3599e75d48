pub mod batch;
pub mod check;
pub mod generate;
pub mod init;
pub mod session;
pub mod tips;
