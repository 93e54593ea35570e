pub mod access;
pub mod api;
pub mod cli;
pub mod core;
pub mod countdown;
