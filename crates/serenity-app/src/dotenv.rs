//! `.env` loading for the API key and other process settings.

use std::path::{Path, PathBuf};

/// Parse `KEY=VALUE` lines. Blank lines, `#` comments, and an optional
/// `export ` prefix are accepted; one layer of matching quotes is removed.
pub(crate) fn parse(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// The current directory first, then the workspace root.
fn candidates() -> [PathBuf; 2] {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    [
        PathBuf::from(".env"),
        manifest_dir.join("..").join("..").join(".env"),
    ]
}

/// Load the first `.env` found. Variables already set in the environment win.
/// Returns the file that was applied.
pub(crate) fn load() -> Option<PathBuf> {
    let (path, contents) = candidates()
        .into_iter()
        .find_map(|path| std::fs::read_to_string(&path).ok().map(|c| (path, c)))?;

    for (key, value) in parse(&contents) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(key, value);
        }
    }
    Some(path)
}
