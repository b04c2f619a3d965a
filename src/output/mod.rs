pub mod documents;
pub mod writer;

pub use writer::write_json;
