pub mod audit;
pub mod config;
pub mod fetch;
pub mod intervals;
pub mod resolve;
pub mod run;
