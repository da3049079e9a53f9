pub mod file;
pub mod settings;
pub mod stdin;
