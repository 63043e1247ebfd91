pub mod config;
pub mod domain;
pub mod sim;
pub mod stream;
