//! Rendering of parse errors with source snippets.

mod printer;

#[cfg(test)]
mod printer_tests;

pub use printer::ErrorsPrinter;
