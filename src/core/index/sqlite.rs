//! SQLite fingerprint index.

use super::{path_text, FingerprintSink, IndexStats, LocationLedger, LocationQuery};
use crate::core::grouper::{group_duplicates, DuplicateGroup};
use crate::core::hasher::FileHash;
use crate::error::IndexError;
use rusqlite::{params, Connection, Transaction};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS files (
        hash TEXT PRIMARY KEY
    );
    CREATE TABLE IF NOT EXISTS locations (
        hash TEXT NOT NULL,
        filepath TEXT NOT NULL,
        PRIMARY KEY (hash, filepath),
        FOREIGN KEY (hash) REFERENCES files(hash)
    );
";

const INSERT_HASH: &str = "INSERT OR IGNORE INTO files (hash) VALUES (?1)";
const INSERT_LOCATION: &str = "INSERT OR IGNORE INTO locations (hash, filepath) VALUES (?1, ?2)";

/// Files SQLite may leave next to the database
const SIDECAR_SUFFIXES: [&str; 3] = ["-journal", "-wal", "-shm"];

/// The database file and every sidecar SQLite may create for it
pub fn store_files(path: &Path) -> Vec<PathBuf> {
    let mut files = vec![path.to_path_buf()];
    for suffix in SIDECAR_SUFFIXES {
        let mut name = OsString::from(path.as_os_str());
        name.push(suffix);
        files.push(PathBuf::from(name));
    }
    files
}

/// SQLite-backed fingerprint index
///
/// The store is rebuilt from scratch by [`FingerprintIndex::create`]; nothing
/// is carried over between runs.
pub struct FingerprintIndex {
    conn: Connection,
    db_path: PathBuf,
}

impl FingerprintIndex {
    /// Discard any store left at `path` and create an empty one
    pub fn create(path: &Path) -> Result<Self, IndexError> {
        for stale in store_files(path) {
            match fs::remove_file(&stale) {
                Ok(()) => tracing::debug!(path = %stale.display(), "removed stale index file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(IndexError::RemoveStale { path: stale, source }),
            }
        }

        let conn = Connection::open(path).map_err(|source| IndexError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Self::init(conn, path.to_path_buf())
    }

    /// Create an empty index that lives only in memory
    pub fn open_in_memory() -> Result<Self, IndexError> {
        let db_path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| IndexError::Open {
            path: db_path.clone(),
            source,
        })?;

        Self::init(conn, db_path)
    }

    fn init(conn: Connection, db_path: PathBuf) -> Result<Self, IndexError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(IndexError::Schema)?;
        conn.execute_batch(SCHEMA).map_err(IndexError::Schema)?;

        Ok(Self { conn, db_path })
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Start the bulk load of a walk
    ///
    /// Nothing recorded through the loader is visible until
    /// [`IndexLoader::commit`]; dropping the loader rolls everything back.
    pub fn begin_load(&mut self) -> Result<IndexLoader<'_>, IndexError> {
        let tx = self.conn.transaction()?;
        Ok(IndexLoader { tx })
    }

    /// Every fingerprint with two or more paths, with its paths
    pub fn duplicate_groups(&self) -> Result<Vec<DuplicateGroup>, IndexError> {
        group_duplicates(self)
    }

    /// Row counts of both relations
    pub fn stats(&self) -> Result<IndexStats, IndexError> {
        let hashes = self
            .conn
            .query_row("SELECT COUNT(*) FROM files", [], |row| {
                row.get::<_, i64>(0).map(|v| v as usize)
            })?;

        let locations = self
            .conn
            .query_row("SELECT COUNT(*) FROM locations", [], |row| {
                row.get::<_, i64>(0).map(|v| v as usize)
            })?;

        Ok(IndexStats { hashes, locations })
    }
}

fn insert_hash(conn: &Connection, hash: &FileHash) -> Result<(), IndexError> {
    conn.prepare_cached(INSERT_HASH)?.execute(params![hash])?;
    Ok(())
}

fn insert_location(conn: &Connection, hash: &FileHash, path: &Path) -> Result<(), IndexError> {
    let filepath = path_text(path)?;
    conn.prepare_cached(INSERT_LOCATION)?
        .execute(params![hash, filepath])?;
    Ok(())
}

impl FingerprintSink for FingerprintIndex {
    fn record_hash(&mut self, hash: &FileHash) -> Result<(), IndexError> {
        insert_hash(&self.conn, hash)
    }

    fn record_location(&mut self, hash: &FileHash, path: &Path) -> Result<(), IndexError> {
        insert_location(&self.conn, hash, path)
    }
}

impl LocationQuery for FingerprintIndex {
    fn duplicate_hashes(&self) -> Result<Vec<FileHash>, IndexError> {
        let mut stmt = self.conn.prepare(
            "SELECT hash
             FROM locations
             GROUP BY hash
             HAVING COUNT(*) > 1
             ORDER BY MIN(rowid)",
        )?;

        let hashes = stmt
            .query_map([], |row| row.get::<_, FileHash>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(hashes)
    }

    fn locations_for(&self, hash: &FileHash) -> Result<Vec<PathBuf>, IndexError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT filepath FROM locations WHERE hash = ?1 ORDER BY rowid")?;

        let paths = stmt
            .query_map(params![hash], |row| row.get::<_, String>(0).map(PathBuf::from))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(paths)
    }
}

impl LocationLedger for FingerprintIndex {
    fn forget_location(&mut self, hash: &FileHash, path: &Path) -> Result<(), IndexError> {
        let filepath = path_text(path)?;

        self.conn.execute(
            "DELETE FROM locations WHERE hash = ?1 AND filepath = ?2",
            params![hash, filepath],
        )?;
        self.conn.execute(
            "DELETE FROM files
             WHERE hash = ?1
               AND NOT EXISTS (SELECT 1 FROM locations WHERE hash = ?1)",
            params![hash],
        )?;

        Ok(())
    }
}

/// One walk's worth of inserts, applied atomically
pub struct IndexLoader<'conn> {
    tx: Transaction<'conn>,
}

impl IndexLoader<'_> {
    /// Make everything recorded so far durable
    pub fn commit(self) -> Result<(), IndexError> {
        self.tx.commit()?;
        Ok(())
    }
}

impl FingerprintSink for IndexLoader<'_> {
    fn record_hash(&mut self, hash: &FileHash) -> Result<(), IndexError> {
        insert_hash(&self.tx, hash)
    }

    fn record_location(&mut self, hash: &FileHash, path: &Path) -> Result<(), IndexError> {
        insert_location(&self.tx, hash, path)
    }
}
