pub mod cli;
pub mod config;
pub mod draft_file;
pub mod draft_parser;
pub mod error;
pub mod logging;
pub mod output;
pub mod repo;
pub mod run;
pub mod state;
pub mod storage;
pub mod todo;
