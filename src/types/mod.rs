pub mod config;
pub mod formula;
pub mod report;
pub mod request;
