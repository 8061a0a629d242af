// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod core;
pub mod params;

pub mod data;
pub mod dedup;
pub mod export;
pub mod log;
pub mod net;
pub mod scrape;
pub mod store;
