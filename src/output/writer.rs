use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Writes `value` as pretty-printed UTF-8 JSON with a trailing newline,
/// creating parent directories and overwriting any existing file.
///
/// serde_json keeps non-ASCII characters literal, so the documents stay
/// readable for the Traditional Chinese fields.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut body = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize document for {}", path.display()))?;
    body.push('\n');

    debug!("Writing {}", path.display());

    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))
}
