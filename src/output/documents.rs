//! JSON projections of [`AnimeItem`] and the envelope documents the client
//! app reads.
//!
//! Field order in these structs is the key order in the emitted JSON, and an
//! absent field is an omitted key, never an explicit `null`. `title`,
//! `image` and `meta` are always present on an item, possibly as `{}`.

use crate::models::{AnimeItem, AnimeLink};
use serde::Serialize;

pub const SOURCE_TYPE: &str = "google_sheets";

/// `source` metadata shared by every envelope. The season catalog carries a
/// `title`, the per-record document no `count`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMeta {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiItem {
    pub id: String,
    pub title: Title,
    pub image: Image,
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airing: Option<Airing>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<AnimeLink>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zh_hant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_large: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub studios: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Airing {
    pub start_date: String,
}

impl ApiItem {
    #[must_use]
    pub fn from_item(item: &AnimeItem) -> Self {
        Self {
            id: item.id.clone(),
            title: Title {
                zh_hant: opt(&item.title_zh),
                native: opt(&item.title_native),
                english: opt(&item.title_en),
            },
            image: Image {
                cover_large: opt(&item.cover),
                banner: opt(&item.banner),
            },
            meta: Meta {
                format: opt(&item.format),
                status: opt(&item.status),
                site_url: opt(&item.site_url),
                genres: item.genres.clone(),
                studios: item.studios.clone(),
            },
            description: opt(&item.description_zh),
            airing: opt(&item.start_date).map(|start_date| Airing { start_date }),
            links: item.links.clone(),
        }
    }
}

fn opt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Envelope for `database/database.json` and `season/season.json`.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub source: SourceMeta,
    pub items: Vec<ApiItem>,
}

/// Envelope for `anime/{id}.json`.
#[derive(Debug, Serialize)]
pub struct Detail {
    pub source: SourceMeta,
    pub item: ApiItem,
}

/// `ping.json` liveness marker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ping {
    pub ping: &'static str,
    pub updated_at: String,
    pub count: usize,
}

#[must_use]
pub fn database(items: &[AnimeItem], updated_at: &str) -> Catalog {
    let api_items: Vec<ApiItem> = items.iter().map(ApiItem::from_item).collect();

    Catalog {
        source: SourceMeta {
            kind: SOURCE_TYPE,
            updated_at: updated_at.to_string(),
            title: None,
            count: Some(api_items.len()),
        },
        items: api_items,
    }
}

#[must_use]
pub fn season(items: &[AnimeItem], updated_at: &str, updated_date: &str) -> Catalog {
    let api_items: Vec<ApiItem> = items
        .iter()
        .filter(|item| item.is_current_season)
        .map(ApiItem::from_item)
        .collect();

    Catalog {
        source: SourceMeta {
            kind: SOURCE_TYPE,
            updated_at: updated_at.to_string(),
            title: Some(format!("{updated_date} 本季")),
            count: Some(api_items.len()),
        },
        items: api_items,
    }
}

#[must_use]
pub fn detail(item: &AnimeItem, updated_at: &str) -> Detail {
    Detail {
        source: SourceMeta {
            kind: SOURCE_TYPE,
            updated_at: updated_at.to_string(),
            title: None,
            count: None,
        },
        item: ApiItem::from_item(item),
    }
}

#[must_use]
pub fn ping(count: usize, updated_at: &str) -> Ping {
    Ping {
        ping: "OK",
        updated_at: updated_at.to_string(),
        count,
    }
}
