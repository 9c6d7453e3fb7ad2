pub mod cli;
pub mod clock;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod store;
pub mod view;
