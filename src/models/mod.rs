pub mod anime;

pub use anime::{AnimeItem, AnimeLink};
