use std::path::{Path, PathBuf};

use crate::domain::SymbolRecord;
use crate::error::Result;
use crate::repo_factory::{discover, open_index};

/// A symbol together with the archive directory its files live in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listed {
    pub dir: PathBuf,
    pub record: SymbolRecord,
}

/// Every symbol of every index under `input_dir`, in discovery then index
/// order.
pub fn list(input_dir: &Path) -> Result<Vec<Listed>> {
    let mut out = Vec::new();
    for dir in discover(input_dir)? {
        for kind in dir.indexes.iter().copied() {
            let index = open_index(kind, &dir.path)?;
            out.extend(index.symbols().iter().map(|r| Listed {
                dir: dir.path.clone(),
                record: r.clone(),
            }));
        }
    }
    Ok(out)
}

/// First symbol named `symbol` anywhere under `input_dir`.
pub fn locate(input_dir: &Path, symbol: &str) -> Result<Option<Listed>> {
    for dir in discover(input_dir)? {
        for kind in dir.indexes.iter().copied() {
            let index = open_index(kind, &dir.path)?;
            if let Some(record) = index.find(symbol) {
                return Ok(Some(Listed {
                    dir: dir.path.clone(),
                    record: record.clone(),
                }));
            }
        }
    }
    Ok(None)
}
