#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;

pub use encoder::HidrEncoder;
pub use error::EncodeError;
