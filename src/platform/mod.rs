//! Platform abstraction layer
//!
//! Browser bindings for the splash and page embellishments. Everything here
//! is wasm32-only; native builds drive the model through `sim::clock`.

#[cfg(target_arch = "wasm32")]
pub mod page;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::boot;
