//! LMDB environment setup.

use std::path::{Path, PathBuf};

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::{LmdbError, LmdbStore};

/// Default memory map size: 1 GiB.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

const MAX_DBS: u32 = 4;
const LEDGER_DB: &str = "ledger";

/// Wraps the LMDB environment and the ledger database handle.
pub struct LmdbEnvironment {
    env: Env,
    ledger_db: Database<Bytes, Bytes>,
    path: PathBuf,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment in the directory `path`.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        let mut options = EnvOpenOptions::new();
        options.map_size(map_size).max_dbs(MAX_DBS);
        // SAFETY: the environment is opened once per directory by this process
        // and never mapped twice concurrently.
        let env = unsafe { options.open(path)? };

        let mut wtxn = env.write_txn()?;
        let ledger_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some(LEDGER_DB))?;
        wtxn.commit()?;

        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self {
            env,
            ledger_db,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A store handle over the ledger database. Handles are cheap to clone.
    pub fn ledger_store(&self) -> LmdbStore {
        LmdbStore::new(self.env.clone(), self.ledger_db)
    }
}
