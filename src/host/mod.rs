//! Host implementations for different platforms.

pub mod terminal;

pub use terminal::TerminalHost;
