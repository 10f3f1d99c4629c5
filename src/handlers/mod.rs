//! Handler implementations

pub mod console;
pub mod memory;

pub use console::{ConsoleChannel, ConsoleHandler};
pub use memory::MemoryHandler;

pub use crate::core::Handler;
