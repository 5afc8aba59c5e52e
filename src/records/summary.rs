use rust_decimal::Decimal;

use super::Record;

/// What the summary line should show. `Empty` is the explicit empty-state
/// signal; a collection with data always reports a total, even if the
/// caller filtered it down to nothing worth summing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    Empty,
    Total(Decimal),
}

impl Summary {
    pub fn of(records: &[Record]) -> Self {
        if records.is_empty() {
            Self::Empty
        } else {
            Self::Total(total(records))
        }
    }
}

/// Sum of amounts; zero for an empty slice, never an error.
pub fn total(records: &[Record]) -> Decimal {
    records.iter().map(|record| record.amount).sum()
}
