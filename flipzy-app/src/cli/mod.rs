pub mod commands;
pub mod opts;
pub mod session;
