use std::path::Path;
use std::sync::{Mutex, MutexGuard};

#[cfg(test)]
use mockall::automock;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::registry::error::CacheError;

/// Trait for storing and retrieving fetched tag lists
#[cfg_attr(test, automock)]
pub trait TagStore: Send + Sync + 'static {
    /// Get the cached tags of a repository, if they are still fresh
    fn cached_tags(
        &self,
        registry: &str,
        repository: &str,
    ) -> Result<Option<Vec<String>>, CacheError>;

    /// Replace all cached tags of a repository, keeping their order
    fn replace_tags(
        &self,
        registry: &str,
        repository: &str,
        tags: Vec<String>,
    ) -> Result<(), CacheError>;
}

pub struct Cache {
    conn: Mutex<Connection>,
    ttl: i64,
}

impl Cache {
    /// Opens (or creates) the cache database at `db_path`.
    ///
    /// Entries older than `ttl` milliseconds are treated as missing.
    pub fn new(db_path: &Path, ttl: i64) -> Result<Self, CacheError> {
        info!("Initializing tag cache at {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let cache = Self {
            conn: Mutex::new(conn),
            ttl,
        };

        cache.create_schema()?;
        debug!("Tag cache initialized");

        Ok(cache)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, CacheError> {
        self.conn.lock().map_err(|_| CacheError::LockPoisoned)
    }

    /// Get current timestamp in milliseconds since UNIX epoch
    fn current_timestamp_ms() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }

    fn create_schema(&self) -> Result<(), CacheError> {
        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS repositories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                registry TEXT NOT NULL,
                repository TEXT NOT NULL,
                updated_at INTEGER NOT NULL,
                UNIQUE(registry, repository)
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS tags (
                repository_id INTEGER NOT NULL,
                position INTEGER NOT NULL,
                tag TEXT NOT NULL,
                FOREIGN KEY (repository_id) REFERENCES repositories(id) ON DELETE CASCADE,
                PRIMARY KEY (repository_id, position)
            )
            "#,
            [],
        )?;

        Ok(())
    }

    /// Get all cached tags of a repository regardless of age
    pub fn get_tags(&self, registry: &str, repository: &str) -> Result<Vec<String>, CacheError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT t.tag FROM tags t
            JOIN repositories r ON t.repository_id = r.id
            WHERE r.registry = ?1 AND r.repository = ?2
            ORDER BY t.position
            "#,
        )?;

        let tags = stmt
            .query_map((registry, repository), |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(tags)
    }

    fn updated_at(&self, registry: &str, repository: &str) -> Result<Option<i64>, CacheError> {
        let conn = self.lock_conn()?;
        let result = conn.query_row(
            "SELECT updated_at FROM repositories WHERE registry = ?1 AND repository = ?2",
            (registry, repository),
            |row| row.get(0),
        );

        match result {
            Ok(updated_at) => Ok(Some(updated_at)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl TagStore for Cache {
    fn cached_tags(
        &self,
        registry: &str,
        repository: &str,
    ) -> Result<Option<Vec<String>>, CacheError> {
        let Some(updated_at) = self.updated_at(registry, repository)? else {
            return Ok(None);
        };

        if Self::current_timestamp_ms() - updated_at >= self.ttl {
            debug!("Cached tags for {}/{} are stale", registry, repository);
            return Ok(None);
        }

        self.get_tags(registry, repository).map(Some)
    }

    fn replace_tags(
        &self,
        registry: &str,
        repository: &str,
        tags: Vec<String>,
    ) -> Result<(), CacheError> {
        debug!(
            "Saving {} tags for {}/{}",
            tags.len(),
            registry,
            repository
        );

        let now = Self::current_timestamp_ms();

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO repositories (registry, repository, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(registry, repository) DO UPDATE SET updated_at = excluded.updated_at
            "#,
            (registry, repository, now),
        )?;

        let repository_id: i64 = tx.query_row(
            "SELECT id FROM repositories WHERE registry = ?1 AND repository = ?2",
            (registry, repository),
            |row| row.get(0),
        )?;

        tx.execute("DELETE FROM tags WHERE repository_id = ?1", [repository_id])?;

        {
            let mut stmt =
                tx.prepare("INSERT INTO tags (repository_id, position, tag) VALUES (?1, ?2, ?3)")?;
            for (position, tag) in tags.iter().enumerate() {
                stmt.execute((repository_id, position as i64, tag))?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cached_tags_returns_none_for_unknown_repository() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(&temp_dir.path().join("tags.db"), 60_000).unwrap();

        assert_eq!(cache.cached_tags("docker.io", "library/nginx").unwrap(), None);
    }

    #[test]
    fn replace_tags_preserves_registry_order() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(&temp_dir.path().join("tags.db"), 60_000).unwrap();

        cache
            .replace_tags("docker.io", "library/nginx", tags(&["1.25", "1.3", "latest", "1.24"]))
            .unwrap();

        assert_eq!(
            cache.cached_tags("docker.io", "library/nginx").unwrap(),
            Some(tags(&["1.25", "1.3", "latest", "1.24"]))
        );
    }

    #[test]
    fn replace_tags_overwrites_previous_entry() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(&temp_dir.path().join("tags.db"), 60_000).unwrap();

        cache
            .replace_tags("ghcr.io", "org/app", tags(&["v1", "v2", "v3"]))
            .unwrap();
        cache.replace_tags("ghcr.io", "org/app", tags(&["v4"])).unwrap();

        assert_eq!(cache.get_tags("ghcr.io", "org/app").unwrap(), tags(&["v4"]));
    }

    #[test]
    fn replace_tags_keeps_repositories_separate() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(&temp_dir.path().join("tags.db"), 60_000).unwrap();

        cache.replace_tags("ghcr.io", "org/app", tags(&["v1"])).unwrap();
        cache.replace_tags("quay.io", "org/app", tags(&["v2"])).unwrap();

        assert_eq!(cache.get_tags("ghcr.io", "org/app").unwrap(), tags(&["v1"]));
        assert_eq!(cache.get_tags("quay.io", "org/app").unwrap(), tags(&["v2"]));
    }

    #[test]
    fn cached_tags_ignores_stale_entries() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(&temp_dir.path().join("tags.db"), 0).unwrap();

        cache.replace_tags("ghcr.io", "org/app", tags(&["v1"])).unwrap();

        assert_eq!(cache.cached_tags("ghcr.io", "org/app").unwrap(), None);
        assert_eq!(cache.get_tags("ghcr.io", "org/app").unwrap(), tags(&["v1"]));
    }

    #[test]
    fn new_creates_missing_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("dir").join("tags.db");

        Cache::new(&db_path, 60_000).unwrap();

        assert!(db_path.exists());
    }
}
