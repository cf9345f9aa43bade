//! Core library for codeassist
//!
//! This crate implements the **Functional Core** of the codeassist service,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! The project uses a two-crate architecture to enforce separation of
//! concerns:
//!
//! - **`codeassist_core`** (this crate): pure transformation functions with
//!   zero I/O
//! - **`codeassist`**: HTTP serving, completion calls, and orchestration
//!   (the Imperative Shell)
//!
//! Everything here is deterministic and side-effect free: the request and
//! response shapes, prompt construction, and response parsing can all be
//! tested with fixture strings, no mocking required. Anything that touches
//! the network (the completion call itself, the HTTP listener) lives in the
//! shell crate.

pub mod analyze;
