//! LMDB implementation of PersistentStore.

use heed::types::Bytes;
use heed::{Database, Env};

use cbc_store::{BatchOp, PersistentStore, StoreError, WriteBatch};

use crate::LmdbError;

#[derive(Clone)]
pub struct LmdbStore {
    env: Env,
    db: Database<Bytes, Bytes>,
}

impl LmdbStore {
    pub(crate) fn new(env: Env, db: Database<Bytes, Bytes>) -> Self {
        Self { env, db }
    }
}

impl PersistentStore for LmdbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self.db.get(&rtxn, key).map_err(LmdbError::from)?;
        Ok(val.map(|v| v.to_vec()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db.put(&mut wtxn, key, value).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db.delete(&mut wtxn, key).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let ops = batch.len();
        // Dropping the transaction on an early return aborts every staged write.
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        for op in batch.into_ops() {
            match op {
                BatchOp::Put { key, value } => {
                    self.db.put(&mut wtxn, &key, &value).map_err(LmdbError::from)?;
                }
                BatchOp::Delete { key } => {
                    self.db.delete(&mut wtxn, &key).map_err(LmdbError::from)?;
                }
            }
        }
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::trace!(ops, "committed write batch");
        Ok(())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut entries = Vec::new();
        let iter = self.db.prefix_iter(&rtxn, prefix).map_err(LmdbError::from)?;
        for result in iter {
            let (key, val) = result.map_err(LmdbError::from)?;
            entries.push((key.to_vec(), val.to_vec()));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LmdbEnvironment;

    fn open_test_env() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
        (dir, env)
    }

    #[test]
    fn put_get_delete() {
        let (_dir, env) = open_test_env();
        let store = env.ledger_store();

        assert_eq!(store.get(b"k").unwrap(), None);
        store.put(b"k", b"v").unwrap();
        assert_eq!(store.get(b"k").unwrap(), Some(b"v".to_vec()));
        assert!(store.exists(b"k").unwrap());

        store.delete(b"k").unwrap();
        assert_eq!(store.get(b"k").unwrap(), None);
    }

    #[test]
    fn deleting_absent_key_is_ok() {
        let (_dir, env) = open_test_env();
        env.ledger_store().delete(b"missing").unwrap();
    }

    #[test]
    fn batch_applies_in_order() {
        let (_dir, env) = open_test_env();
        let store = env.ledger_store();
        store.put(b"gone", b"x").unwrap();

        let mut batch = WriteBatch::new();
        batch
            .put(b"a".to_vec(), b"1".to_vec())
            .put(b"a".to_vec(), b"2".to_vec())
            .delete(b"gone".to_vec());
        store.commit(batch).unwrap();

        assert_eq!(store.get(b"a").unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.get(b"gone").unwrap(), None);
    }

    #[test]
    fn scan_prefix_only_returns_matching_keys() {
        let (_dir, env) = open_test_env();
        let store = env.ledger_store();
        store.put(&[1, 0xaa], b"x").unwrap();
        store.put(&[1, 0xbb], b"y").unwrap();
        store.put(&[2, 0xaa], b"z").unwrap();

        let entries = store.scan_prefix(&[1]).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, vec![1, 0xaa]);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let env = LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
            env.ledger_store().put(b"supply", b"42").unwrap();
        }
        let env = LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
        assert_eq!(env.ledger_store().get(b"supply").unwrap(), Some(b"42".to_vec()));
    }
}
