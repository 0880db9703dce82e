#![warn(clippy::pedantic)]

pub mod decoder;
pub mod error;

pub use decoder::HidrDecoder;
pub use error::DecodeError;
