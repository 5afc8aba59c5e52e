//! Pure derivations over a record slice. Nothing here touches the store
//! or its persistence; filtering only decides what is displayed, while
//! reordering is the store's business (see `RecordStore::sort_by`).

use std::cmp::Ordering;

use super::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Amount,
    Category,
}

/// Records whose category contains `query` case-insensitively, in their
/// original order. Empty or whitespace-only queries match everything.
pub fn filter_by_category<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| record.category.to_lowercase().contains(&query))
        .collect()
}

/// Comparator shared by the store's canonical sort and any view-side sort.
/// Ties compare equal, so a stable sort keeps their relative order.
pub fn compare(key: SortKey, a: &Record, b: &Record) -> Ordering {
    match key {
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn record(id: u64, category: &str, amount: i64) -> Record {
        Record {
            id,
            description: format!("record {id}"),
            amount: Decimal::new(amount, 2),
            category: category.to_string(),
        }
    }

    #[test]
    fn empty_query_is_identity() {
        let records = vec![record(1, "Food", 450), record(2, "Transport", 200)];
        let view = filter_by_category(&records, "");
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].id, 1);
        assert_eq!(view[1].id, 2);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let records = vec![
            record(1, "Food", 450),
            record(2, "Transport", 200),
            record(3, "Fast Food", 899),
        ];
        let view = filter_by_category(&records, "fOo");
        assert_eq!(view.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn filter_preserves_order() {
        let records = vec![
            record(3, "Food", 450),
            record(1, "Food", 200),
            record(2, "Food", 899),
        ];
        let view = filter_by_category(&records, "food");
        assert_eq!(view.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn amount_comparator_is_numeric() {
        let cheap = record(1, "Food", 200);
        let pricey = record(2, "Food", 1000);
        assert_eq!(compare(SortKey::Amount, &cheap, &pricey), Ordering::Less);
        assert_eq!(compare(SortKey::Amount, &pricey, &cheap), Ordering::Greater);
        assert_eq!(compare(SortKey::Amount, &cheap, &cheap), Ordering::Equal);
    }

    #[test]
    fn category_comparator_ignores_case() {
        let a = record(1, "food", 200);
        let b = record(2, "FOOD", 450);
        assert_eq!(compare(SortKey::Category, &a, &b), Ordering::Equal);
        let c = record(3, "Transport", 450);
        assert_eq!(compare(SortKey::Category, &a, &c), Ordering::Less);
    }
}
