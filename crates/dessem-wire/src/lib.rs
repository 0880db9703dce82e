#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod layout;
pub mod writer;

pub use cursor::RecordCursor;
pub use error::WireError;
pub use layout::RECORD_SIZE;
pub use writer::RecordWriter;
