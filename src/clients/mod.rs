pub mod sheets;

pub use sheets::SheetsClient;
