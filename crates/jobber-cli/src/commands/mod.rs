pub mod compare;
pub mod init;
pub mod ratio;
pub mod score;
pub mod validate;
