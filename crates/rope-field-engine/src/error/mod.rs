//! Error types for the encoding engine.

mod types;


pub use types::{EncodingError, EncodingResult};
