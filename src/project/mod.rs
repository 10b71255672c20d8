//! Project layer: input loading, run configuration, assembly and output.

mod assembler;
pub mod config;
pub mod file_loader;
pub mod output;

pub use assembler::MetadataAssembler;
pub use config::MetadataConfig;
