use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::container::emaster::EMaster;
use crate::container::xmaster::XMaster;
use crate::domain::IndexKind;
use crate::error::{MsError, Result};
use crate::repo::SymbolIndex;

pub fn open_index(kind: IndexKind, dir: &Path) -> Result<Box<dyn SymbolIndex>> {
    match kind {
        IndexKind::EMaster => Ok(Box::new(EMaster::open(dir)?)),
        IndexKind::XMaster => Ok(Box::new(XMaster::open(dir)?)),
    }
}

/// A directory holding at least one master index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveDir {
    pub path: PathBuf,
    pub indexes: Vec<IndexKind>,
}

impl ArchiveDir {
    fn probe(path: &Path) -> Option<Self> {
        let indexes: Vec<_> = IndexKind::ALL
            .into_iter()
            .filter(|k| path.join(k.file_name()).is_file())
            .collect();
        if indexes.is_empty() {
            None
        } else {
            Some(Self {
                path: path.to_path_buf(),
                indexes,
            })
        }
    }
}

/// Find every directory under `root` (inclusive) that holds an EMASTER or
/// XMASTER, sorted by path.
pub fn discover(root: &Path) -> Result<Vec<ArchiveDir>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            MsError::Io(
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk loop")),
            )
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(dir) = ArchiveDir::probe(entry.path()) {
            debug!(dir = %dir.path.display(), indexes = ?dir.indexes, "archive directory");
            found.push(dir);
        }
    }
    if found.is_empty() {
        return Err(MsError::MissingIndex {
            dir: root.to_path_buf(),
        });
    }
    Ok(found)
}
