use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;

/// One data line of the sheet, keyed by trimmed header name.
pub type SheetRow = HashMap<String, String>;

/// Parses published-CSV text into ordered row maps.
///
/// The first record is the header. Rows shorter than the header are padded
/// with empty strings (a missing cell is the same as a blank one); cells
/// beyond the header are ignored. Columns the normalizer does not recognize
/// simply stay unread in the map.
pub fn parse_rows(text: &str) -> Result<Vec<SheetRow>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;

        let mut row = SheetRow::with_capacity(headers.len());
        for (i, key) in headers.iter().enumerate() {
            row.insert(key.clone(), record.get(i).unwrap_or("").to_string());
        }
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_source_order() {
        let text = "id,title_zhHant\na1,甲\na2,乙\n";
        let rows = parse_rows(text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "a1");
        assert_eq!(rows[1]["title_zhHant"], "乙");
    }

    #[test]
    fn trims_headers_and_values() {
        let text = " id , year \n a1 , 2024 \n";
        let rows = parse_rows(text).unwrap();

        assert_eq!(rows[0]["id"], "a1");
        assert_eq!(rows[0]["year"], "2024");
    }

    #[test]
    fn short_rows_pad_missing_cells_with_empty() {
        let text = "id,year,season\na1\n";
        let rows = parse_rows(text).unwrap();

        assert_eq!(rows[0]["id"], "a1");
        assert_eq!(rows[0]["year"], "");
        assert_eq!(rows[0]["season"], "");
    }

    #[test]
    fn extra_cells_beyond_header_are_ignored() {
        let text = "id,year\na1,2024,stray\n";
        let rows = parse_rows(text).unwrap();

        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0]["year"], "2024");
    }

    #[test]
    fn quoted_fields_keep_embedded_delimiters() {
        let text = "id,description_zhHant\na1,\"一句話，有逗號\"\n";
        let rows = parse_rows(text).unwrap();

        assert_eq!(rows[0]["description_zhHant"], "一句話，有逗號");
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_rows("").unwrap().is_empty());
        assert!(parse_rows("id,year\n").unwrap().is_empty());
    }
}
