//! Ready-made sinks
//!
//! Any `io::Write + Send + 'static` value can be a sink. These cover the
//! default destination, in-memory capture and appending to a file.

pub mod file;
pub mod memory;

pub use file::FileSink;
pub use memory::MemorySink;

use std::io;

/// The default destination: the process's standard error stream
pub fn stderr() -> io::Stderr {
    io::stderr()
}
