// mstk_core/src/repo.rs
use crate::container::RejectedRecord;
use crate::domain::{IndexKind, SymbolRecord};

/// Which symbols a conversion run should touch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SymbolFilter {
    #[default]
    All,
    Only(Vec<String>),
}

impl SymbolFilter {
    pub fn new(all: bool, symbols: Vec<String>) -> Self {
        if all { Self::All } else { Self::Only(symbols) }
    }

    pub fn matches(&self, symbol: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.iter().any(|w| w == symbol),
        }
    }
}

/// A parsed master index. Implementations own their records; the on-disk
/// layouts stay private to each reader.
pub trait SymbolIndex {
    fn kind(&self) -> IndexKind;

    /// Every record, in index order.
    fn symbols(&self) -> &[SymbolRecord];

    /// Records that were read but refused (bad date, zero file number).
    fn rejected(&self) -> &[RejectedRecord];

    /// Hand the rejected records over, leaving none behind.
    fn take_rejected(&mut self) -> Vec<RejectedRecord>;

    /// Records matching `filter`, in index order.
    fn select(&self, filter: &SymbolFilter) -> Vec<&SymbolRecord> {
        self.symbols()
            .iter()
            .filter(|r| filter.matches(&r.symbol))
            .collect()
    }

    fn find(&self, symbol: &str) -> Option<&SymbolRecord> {
        self.symbols().iter().find(|r| r.symbol == symbol)
    }
}
