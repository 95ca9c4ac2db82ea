//! Built-in template sources

pub mod dir;
pub mod memory;

pub use dir::DirSource;
pub use memory::MemorySource;
