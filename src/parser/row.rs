//! Row normalization: permissive sheet text → typed [`AnimeItem`].
//!
//! Every helper here is total. Sheet data is human-edited and expected to be
//! messy, so malformed optional fields degrade to "absent" instead of
//! failing the run. The only gate is a blank `id`, which drops the row.

use crate::models::{AnimeItem, AnimeLink};
use crate::parser::sheet::SheetRow;

const TRUTHY: &[&str] = &["true", "1", "yes", "y", "t"];

/// Builds a record from one sheet row, or `None` when the row has no id.
#[must_use]
pub fn to_item(row: &SheetRow) -> Option<AnimeItem> {
    let id = field(row, "id");
    if id.is_empty() {
        return None;
    }

    Some(AnimeItem {
        id,
        title_zh: field(row, "title_zhHant"),
        title_native: field(row, "title_native"),
        title_en: field(row, "title_english"),
        description_zh: field(row, "description_zhHant"),
        cover: field(row, "coverLarge"),
        banner: field(row, "banner"),
        site_url: field(row, "siteUrl"),
        year: parse_year(&field(row, "year")),
        season: field(row, "season").to_uppercase(),
        format: field(row, "format").to_uppercase(),
        status: field(row, "status").to_uppercase(),
        genres: split_pipe(&field(row, "genres")),
        studios: split_pipe(&field(row, "studios")),
        is_current_season: truthy(&field(row, "isCurrentSeason")),
        start_date: field(row, "startDate"),
        links: parse_links(&field(row, "links")),
    })
}

fn field(row: &SheetRow, key: &str) -> String {
    row.get(key).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Splits a pipe-delimited cell, trimming segments and dropping empty ones.
/// Source order is preserved.
fn split_pipe(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parses a `Site=https://... | Other=https://...` cell. Segments without
/// `=`, or with an empty site or url after trimming, are silently dropped.
fn parse_links(value: &str) -> Vec<AnimeLink> {
    split_pipe(value)
        .iter()
        .filter_map(|part| {
            let (site, url) = part.split_once('=')?;
            let site = site.trim();
            let url = url.trim();
            if site.is_empty() || url.is_empty() {
                return None;
            }
            Some(AnimeLink {
                site: site.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

fn truthy(value: &str) -> bool {
    TRUTHY.contains(&value.trim().to_lowercase().as_str())
}

/// Empty and non-numeric cells both yield `None`; a year is never an error.
fn parse_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> SheetRow {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn blank_id_yields_no_record() {
        assert!(to_item(&row(&[("id", ""), ("title_zhHant", "某作品")])).is_none());
        assert!(to_item(&row(&[("id", "   ")])).is_none());
        assert!(to_item(&row(&[("title_zhHant", "沒有 id")])).is_none());
    }

    #[test]
    fn split_pipe_trims_and_drops_empty_segments() {
        assert_eq!(
            split_pipe("Action | Comedy|  |Drama"),
            vec!["Action", "Comedy", "Drama"]
        );
        assert!(split_pipe("").is_empty());
        assert!(split_pipe(" | | ").is_empty());
    }

    #[test]
    fn parse_links_drops_malformed_segments() {
        let links = parse_links("AniList=https://anilist.co/x | Bad | MAL=https://myanimelist.net/y");
        assert_eq!(
            links,
            vec![
                AnimeLink {
                    site: "AniList".to_string(),
                    url: "https://anilist.co/x".to_string(),
                },
                AnimeLink {
                    site: "MAL".to_string(),
                    url: "https://myanimelist.net/y".to_string(),
                },
            ]
        );
    }

    #[test]
    fn parse_links_requires_both_site_and_url() {
        assert!(parse_links("=https://example.com").is_empty());
        assert!(parse_links("Site=").is_empty());
        assert!(parse_links(" = ").is_empty());
    }

    #[test]
    fn parse_links_splits_on_first_equals_only() {
        let links = parse_links("Official=https://example.com/?a=1&b=2");
        assert_eq!(links[0].url, "https://example.com/?a=1&b=2");
    }

    #[test]
    fn truthy_matches_the_fixed_token_set() {
        for value in ["true", "TRUE", " Yes ", "y", "Y", "1", "t"] {
            assert!(truthy(value), "{value:?} should be truthy");
        }
        for value in ["", "0", "no", "n", "false", "maybe", "2"] {
            assert!(!truthy(value), "{value:?} should be falsy");
        }
    }

    #[test]
    fn parse_year_swallows_bad_input() {
        assert_eq!(parse_year("2024"), Some(2024));
        assert_eq!(parse_year(" 2024 "), Some(2024));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("  "), None);
        assert_eq!(parse_year("soon"), None);
        assert_eq!(parse_year("20.24"), None);
    }

    #[test]
    fn season_format_status_are_uppercased_without_validation() {
        let item = to_item(&row(&[
            ("id", "a1"),
            ("season", " fall "),
            ("format", "tv"),
            ("status", "whatever text"),
        ]))
        .unwrap();

        assert_eq!(item.season, "FALL");
        assert_eq!(item.format, "TV");
        assert_eq!(item.status, "WHATEVER TEXT");
    }

    #[test]
    fn full_row_maps_every_field() {
        let item = to_item(&row(&[
            ("id", "aot-1"),
            ("title_zhHant", "進擊的巨人"),
            ("title_native", "進撃の巨人"),
            ("title_english", "Attack on Titan"),
            ("description_zhHant", "巨人の話"),
            ("coverLarge", "https://img.example/cover.jpg"),
            ("banner", "https://img.example/banner.jpg"),
            ("siteUrl", "https://anilist.co/anime/16498"),
            ("year", "2013"),
            ("season", "SPRING"),
            ("format", "TV"),
            ("status", "FINISHED"),
            ("genres", "Action|Drama"),
            ("studios", "WIT STUDIO"),
            ("isCurrentSeason", "no"),
            ("startDate", "2013-04-07"),
            ("links", "AniList=https://anilist.co/anime/16498"),
        ]))
        .unwrap();

        assert_eq!(item.id, "aot-1");
        assert_eq!(item.title_zh, "進擊的巨人");
        assert_eq!(item.year, Some(2013));
        assert_eq!(item.genres, vec!["Action", "Drama"]);
        assert_eq!(item.studios, vec!["WIT STUDIO"]);
        assert!(!item.is_current_season);
        assert_eq!(item.start_date, "2013-04-07");
        assert_eq!(item.links.len(), 1);
    }

    #[test]
    fn missing_columns_degrade_to_empty() {
        let item = to_item(&row(&[("id", "bare")])).unwrap();

        assert_eq!(item.title_zh, "");
        assert_eq!(item.year, None);
        assert!(item.genres.is_empty());
        assert!(item.links.is_empty());
        assert!(!item.is_current_season);
    }
}
