pub mod demo;
pub mod process_file;
