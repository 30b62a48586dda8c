pub mod notes;
pub mod todos;

use anyhow::{Context, Result};
use deskmate_core::{Config, LocalStore};

/// Open the configured key-value store, creating the file and table if needed.
pub async fn open_store(config: &Config) -> Result<LocalStore> {
    Config::ensure_config_dir()?;
    let path = config.store_path()?;
    let store = LocalStore::new(&path)
        .await
        .with_context(|| format!("Failed to open store: {}", path.display()))?;
    store.run_migrations().await.context("Failed to prepare store")?;
    Ok(store)
}

/// First eight characters of an id, or the whole id when shorter.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Resolve an id or id prefix against the given ids.
pub fn resolve_id<'a, I>(ids: I, prefix: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        anyhow::bail!("An id is required");
    }

    let ids: Vec<&str> = ids.into_iter().collect();
    if let Some(exact) = ids.iter().find(|id| id.to_lowercase() == prefix) {
        return Ok(exact.to_string());
    }

    let matches: Vec<&str> = ids
        .into_iter()
        .filter(|id| id.to_lowercase().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [] => anyhow::bail!("No entry matches '{}'", prefix),
        [id] => Ok(id.to_string()),
        _ => anyhow::bail!(
            "Ambiguous id '{}' matches {} entries - provide more characters",
            prefix,
            matches.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0f3c9a1e-aaaa-bbbb"), "0f3c9a1e");
        assert_eq!(short_id("42"), "42");
    }

    #[test]
    fn test_resolve_id_prefix() {
        let ids = ["abc123", "abd456", "xyz"];
        assert_eq!(resolve_id(ids, "abc").unwrap(), "abc123");
        assert_eq!(resolve_id(ids, "XY").unwrap(), "xyz");
    }

    #[test]
    fn test_resolve_id_ambiguous_and_missing() {
        let ids = ["abc123", "abd456"];
        assert!(resolve_id(ids, "ab").is_err());
        assert!(resolve_id(ids, "zz").is_err());
        assert!(resolve_id(ids, " ").is_err());
    }

    #[test]
    fn test_resolve_id_exact_beats_prefix() {
        let ids = ["17", "1718000000000"];
        assert_eq!(resolve_id(ids, "17").unwrap(), "17");
    }
}
