//! Facade over the `gridalign` crate.
//!
//! Enable the `proj` feature to use the PROJ library instead of the pure Rust `proj4rs` backend.

#[doc(inline)]
pub use gridalign::*;
