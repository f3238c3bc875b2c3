//! Host adapters

pub mod console;

pub use console::ConsoleHost;
