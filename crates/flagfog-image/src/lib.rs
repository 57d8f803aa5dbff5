//! # Flagfog Image
//!
//! Flag image pipeline: fetch the flag bytes over HTTPS with a bounded
//! timeout, decode and normalize to 3-channel RGB at the original
//! dimensions, apply a strong fixed-kernel Gaussian blur, and encode both
//! variants as base64 `data:` URIs ready for direct JSON embedding.
//!
//! Any failure here degrades to placeholder images at the call site; it
//! never takes down puzzle generation.

pub mod pipeline;

pub use pipeline::{derive_pair, sigma_for_kernel, FlagProcessor};
