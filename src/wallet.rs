//! Persistent gold total, kept as a single decimal line on disk.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::StorageError;

/// Read the saved gold total. A missing file is an empty wallet.
pub fn load(path: &Path) -> Result<u32, StorageError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("no wallet at {}, starting with 0 gold", path.display());
            return Ok(0);
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    contents
        .trim()
        .parse::<u32>()
        .map_err(|_| StorageError::InvalidWallet {
            path: path.to_path_buf(),
            contents,
        })
}

/// Overwrite the wallet file with `gold`.
pub fn save(path: &Path, gold: u32) -> Result<(), StorageError> {
    std::fs::write(path, format!("{gold}\n")).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gold.txt");
        for gold in [0, 5, 1234, u32::MAX] {
            save(&path, gold).unwrap();
            assert_eq!(load(&path).unwrap(), gold);
        }
    }

    #[test]
    fn test_missing_file_is_empty_wallet() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load(&tmp.path().join("gold.txt")).unwrap(), 0);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gold.txt");
        std::fs::write(&path, "lots of gold\n").unwrap();
        assert!(matches!(load(&path), Err(StorageError::InvalidWallet { .. })));
    }

    #[test]
    fn test_file_is_one_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gold.txt");
        save(&path, 42).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "42\n");
    }
}
