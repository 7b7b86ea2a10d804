//! File System Implementations
//!
//! Concrete implementations of the FileSystem and DirectoryWalker ports.

mod local;
mod walker;

pub use local::LocalFs;
pub use walker::IgnoreWalker;
