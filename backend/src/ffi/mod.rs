//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings that let a Python object act as the environment, e.g. a
//! Selenium-driven browser page, while the run loop stays in Rust.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: Python supplies raw page text, Rust parses it
//! 2. **Simple types**: Strings, lists, dicts at the boundary
//! 3. **Safe errors**: Python exceptions become `EnvironmentError`s inside
//!    the loop and `RuntimeError`/`ValueError` outside it

pub mod environment;
pub mod session;
