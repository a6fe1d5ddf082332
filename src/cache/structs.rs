use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based JSON cache: collection snapshots at the top level, scheduling
/// drafts in a `drafts/` subdirectory
pub struct Cache {
    cache_dir: PathBuf,
    drafts_dir: PathBuf,
}

impl Cache {
    /// Create a new cache instance
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        let drafts_dir = cache_dir.join("drafts");

        fs::create_dir_all(&drafts_dir).context("Failed to create cache directory")?;

        Ok(Self {
            cache_dir,
            drafts_dir,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Save data to cache
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_path(key);
        self.write_json(&file_path, data)?;
        debug!("Saved data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load data from cache
    pub fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.build_path(key);
        let data = self.read_json_opt(&file_path)?;
        if data.is_some() {
            debug!("Loaded data from cache: {}", file_path.display());
        }
        Ok(data)
    }

    /// Remove one cached entry; a missing entry is not an error
    pub fn remove(&self, key: &str) -> Result<()> {
        self.remove_file(&self.build_path(key))
    }

    // --- Draft Methods ---

    pub fn save_draft<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_draft_path(key);
        self.write_json(&file_path, data)?;
        info!("Saved draft: {}", file_path.display());
        Ok(())
    }

    pub fn load_draft<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        self.read_json_opt(&self.build_draft_path(key))
    }

    pub fn remove_draft(&self, key: &str) -> Result<()> {
        self.remove_file(&self.build_draft_path(key))
    }

    // --- Helper Methods ---

    fn build_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", sanitize_key(key)))
    }

    fn build_draft_path(&self, key: &str) -> PathBuf {
        self.drafts_dir.join(format!("{}.json", sanitize_key(key)))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write cache file {}", path.display()))?;
        Ok(())
    }

    fn read_json_opt<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache file {}", path.display()))?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                path,
                json.chars().take(200).collect::<String>()
            )
        })?;
        Ok(Some(data))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove cache file {}", path.display()))?;
        }
        Ok(())
    }
}

/// Store paths like `club/members` map to a flat file name.
fn sanitize_key(key: &str) -> String {
    let safe = key.replace('/', "_");
    let safe = safe.trim_matches('_');
    if safe.is_empty() {
        "root".to_string()
    } else {
        safe.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        value: String,
    }

    fn temp_cache(name: &str) -> Cache {
        let temp_dir = std::env::temp_dir().join(format!("tennis_club_cache_{}", name));
        let _ = fs::remove_dir_all(&temp_dir);
        Cache::new(&temp_dir).unwrap()
    }

    #[test]
    fn test_cache_save_and_load() {
        let cache = temp_cache("save_load");

        let data = TestData {
            value: "test".to_string(),
        };

        cache.save("test_key", &data).unwrap();
        let loaded: Option<TestData> = cache.load("test_key").unwrap();

        assert_eq!(loaded, Some(data));

        cache.remove("test_key").unwrap();
        assert!(cache.load::<TestData>("test_key").unwrap().is_none());
        fs::remove_dir_all(cache.dir()).unwrap();
    }

    #[test]
    fn test_missing_key_loads_none() {
        let cache = temp_cache("missing");
        let loaded: Option<TestData> = cache.load("absent").unwrap();
        assert!(loaded.is_none());
        cache.remove("absent").unwrap();
        fs::remove_dir_all(cache.dir()).unwrap();
    }

    #[test]
    fn test_drafts_are_separate_from_snapshots() {
        let cache = temp_cache("drafts");
        let data = TestData {
            value: "draft".to_string(),
        };

        cache.save_draft("2025-03-06", &data).unwrap();
        assert!(cache.load::<TestData>("2025-03-06").unwrap().is_none());
        assert_eq!(cache.load_draft::<TestData>("2025-03-06").unwrap(), Some(data));

        cache.remove_draft("2025-03-06").unwrap();
        assert!(cache.load_draft::<TestData>("2025-03-06").unwrap().is_none());
        fs::remove_dir_all(cache.dir()).unwrap();
    }

    #[test]
    fn test_key_sanitizing() {
        assert_eq!(sanitize_key("club/members"), "club_members");
        assert_eq!(sanitize_key("/"), "root");
    }
}
