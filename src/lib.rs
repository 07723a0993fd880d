pub mod config;
pub mod error;
pub mod http;
pub mod schedule;
pub mod shutdown;
pub mod sites;
pub mod startup;
pub mod utils;
