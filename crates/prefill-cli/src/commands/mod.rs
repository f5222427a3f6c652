pub mod config;
pub mod parse;
pub mod sections;
