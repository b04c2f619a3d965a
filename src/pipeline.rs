//! The build pipeline: fetch → parse → normalize → dedup gate → sort →
//! project → write.
//!
//! Single pass, no feedback loops. The duplicate-id gate runs before any
//! file is touched, so a failed run never leaves partial output behind.

use crate::clients::SheetsClient;
use crate::config::Config;
use crate::models::AnimeItem;
use crate::output::{documents, write_json};
use crate::parser;
use anyhow::Result;
use chrono::{Local, SecondsFormat};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Fatal build failures, each mapped to a distinct process exit code.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(
        "SHEET_CSV_URL is not set. Set the SHEET_CSV_URL env var (or source.url in config.toml) to your published CSV URL"
    )]
    MissingSourceUrl,

    #[error("duplicate ids found: {}", ids.join(", "))]
    DuplicateIds { ids: Vec<String> },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuildError {
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingSourceUrl => 2,
            Self::DuplicateIds { .. } => 3,
            Self::Other(_) => 1,
        }
    }
}

/// What a successful run produced, for the one-line stdout summary.
#[derive(Debug)]
pub struct BuildSummary {
    pub updated_at: String,
    pub total: usize,
    pub season_count: usize,
}

impl BuildSummary {
    #[must_use]
    pub fn one_line(&self) -> String {
        format!(
            "OK: wrote database/season/anime/* + ping. updatedAt={}, count={}",
            self.updated_at, self.total
        )
    }
}

/// Runs one full build against the configured sheet.
pub async fn run_build(config: &Config) -> Result<BuildSummary, BuildError> {
    let url = config.source_url().ok_or(BuildError::MissingSourceUrl)?;
    config.validate()?;

    let client = SheetsClient::new(config)?;
    let text = client.fetch_csv(&url).await?;

    let rows = parser::parse_rows(&text)?;
    let mut items: Vec<AnimeItem> = rows.iter().filter_map(parser::to_item).collect();

    let dropped = rows.len() - items.len();
    if dropped > 0 {
        debug!("Dropped {dropped} row(s) without an id");
    }

    check_duplicate_ids(&items)?;
    check_file_safe_ids(&items)?;
    sort_items(&mut items);

    // One timestamp per run, shared by every document.
    let updated_at = now_iso_datetime();
    let updated_date = now_iso_date();

    let season_count = items.iter().filter(|i| i.is_current_season).count();

    write_documents(&config.output_root(), &items, &updated_at, &updated_date)?;

    info!(
        total = items.len(),
        season = season_count,
        "Build complete"
    );

    Ok(BuildSummary {
        updated_at,
        total: items.len(),
        season_count,
    })
}

/// Fails with every duplicated id (once each, in first-seen order) if any id
/// occurs more than once.
pub fn check_duplicate_ids(items: &[AnimeItem]) -> Result<(), BuildError> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.id.as_str()).or_default() += 1;
    }

    let mut ids = Vec::new();
    let mut reported: HashSet<&str> = HashSet::new();
    for item in items {
        if counts.get(item.id.as_str()).copied().unwrap_or(0) > 1
            && reported.insert(item.id.as_str())
        {
            ids.push(item.id.clone());
        }
    }

    if ids.is_empty() {
        Ok(())
    } else {
        Err(BuildError::DuplicateIds { ids })
    }
}

/// Each id becomes the `anime/{id}.json` file name; a separator or parent
/// component would write outside the output root.
pub fn check_file_safe_ids(items: &[AnimeItem]) -> Result<()> {
    for item in items {
        let id = item.id.as_str();
        if id.contains('/') || id.contains('\\') || id == "." || id == ".." {
            anyhow::bail!("id {id:?} is not usable as a file name");
        }
    }
    Ok(())
}

/// Deterministic total order: current season first, then newer years, then
/// season name, then display title. Keeps repeated runs diff-clean; the
/// order carries no ranking meaning.
pub fn sort_items(items: &mut [AnimeItem]) {
    items.sort_by_cached_key(|item| {
        (
            !item.is_current_season,
            Reverse(item.year.unwrap_or(0)),
            item.season.clone(),
            item.display_title().to_string(),
        )
    });
}

/// Writes the full document set under `out_root`. Pure given its inputs, so
/// two calls with the same items and timestamps produce identical bytes.
pub fn write_documents(
    out_root: &Path,
    items: &[AnimeItem],
    updated_at: &str,
    updated_date: &str,
) -> Result<()> {
    write_json(
        &out_root.join("database").join("database.json"),
        &documents::database(items, updated_at),
    )?;

    write_json(
        &out_root.join("season").join("season.json"),
        &documents::season(items, updated_at, updated_date),
    )?;

    for item in items {
        write_json(
            &out_root.join("anime").join(format!("{}.json", item.id)),
            &documents::detail(item, updated_at),
        )?;
    }

    write_json(
        &out_root.join("ping.json"),
        &documents::ping(items.len(), updated_at),
    )?;

    Ok(())
}

/// Local-offset timestamp with seconds precision, e.g. `2024-05-01T12:00:00+08:00`.
fn now_iso_datetime() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn now_iso_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
