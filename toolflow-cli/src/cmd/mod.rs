pub mod catalog;
pub mod config;
pub mod progress;
pub mod run;
pub mod tool;
pub mod tools;
pub mod validate;
pub mod workflows;
