use serde::{Deserialize, Serialize};

/// Canonical in-memory record for one spreadsheet row.
///
/// Built once by the row normalizer and never mutated afterwards. Only its
/// JSON projection (`output::documents::ApiItem`) is ever persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeItem {
    pub id: String,
    pub title_zh: String,
    pub title_native: String,
    pub title_en: String,
    pub description_zh: String,
    pub cover: String,
    pub banner: String,
    pub site_url: String,
    pub year: Option<i32>,
    pub season: String,
    pub format: String,
    pub status: String,
    pub genres: Vec<String>,
    pub studios: Vec<String>,
    pub is_current_season: bool,
    /// `YYYY-MM-DD`, or empty when the sheet cell is blank. Not validated.
    pub start_date: String,
    pub links: Vec<AnimeLink>,
}

impl AnimeItem {
    /// First non-empty display title, falling back to the id.
    ///
    /// Used as the final sort tie-break so the output order stays
    /// deterministic even when every other visible field matches.
    #[must_use]
    pub fn display_title(&self) -> &str {
        [&self.title_zh, &self.title_native, &self.title_en]
            .into_iter()
            .find(|t| !t.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeLink {
    pub site: String,
    pub url: String,
}
