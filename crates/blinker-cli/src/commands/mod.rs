pub mod completions;
pub mod config;
pub mod defaults;
pub mod run;
