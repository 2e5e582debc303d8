//! The classic design patterns, written in Rust terms.
//!
//! Every pattern module has two demos: a conceptual one with placeholder
//! types, and a real-world scenario. Demos never print; they return a
//! [`Transcript`](transcript::Transcript) and the `patterns` binary writes it
//! out.
//!
//! ```
//! use design_patterns::catalog::{self, Example, Pattern};
//! use design_patterns::config::CatalogConfig;
//!
//! let pattern: Pattern = "strategy".parse().unwrap();
//! let out = catalog::run(pattern, Example::RealWorld, &CatalogConfig::default()).unwrap();
//! assert!(out.contains("Result: 42"));
//! ```

pub mod behavioral;
pub mod catalog;
pub mod config;
pub mod creational;
pub mod error;
pub mod structural;
pub mod transcript;

pub use error::{PatternError, Result};
pub use transcript::Transcript;
