//! Row filters: tree selection and the inclusive age query.
//!
//! Both filters keep source order and never fail.

use super::model::{Row, SelectionSet, Table};

/// Rows whose tree is in `selection`. Unknown trees match nothing.
pub fn select_entities(table: &Table, selection: &SelectionSet) -> Table {
    if selection.is_empty() {
        return Table::default();
    }
    filter_rows(table, |row| selection.contains(&row.tree))
}

/// Rows with `age <= threshold`. The caller is responsible for clamping.
pub fn query_by_age(table: &Table, threshold: f64) -> Table {
    filter_rows(table, |row| row.age <= threshold)
}

fn filter_rows(table: &Table, keep: impl Fn(&Row) -> bool) -> Table {
    table.rows().iter().filter(|r| keep(r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Row::new("1", "T1", 118.0, 30.0),
            Row::new("2", "T1", 484.0, 58.0),
            Row::new("3", "T2", 118.0, 33.0),
            Row::new("4", "T2", 484.0, 69.0),
            Row::new("5", "T3", 118.0, 30.0),
        ])
    }

    #[test]
    fn test_select_single_tree() {
        let filtered = select_entities(&sample(), &SelectionSet::new(["T1"]));
        assert_eq!(
            filtered.rows(),
            &[
                Row::new("1", "T1", 118.0, 30.0),
                Row::new("2", "T1", 484.0, 58.0)
            ]
        );
    }

    #[test]
    fn test_select_keeps_source_order() {
        let filtered = select_entities(&sample(), &SelectionSet::new(["T3", "T1"]));
        let index: Vec<&str> = filtered.rows().iter().map(|r| r.index.as_str()).collect();
        assert_eq!(index, vec!["1", "2", "5"]);
    }

    #[test]
    fn test_select_exactly_members() {
        let table = sample();
        let selection = SelectionSet::new(["T2", "T3"]);
        let filtered = select_entities(&table, &selection);
        let expected = table
            .rows()
            .iter()
            .filter(|r| r.tree == "T2" || r.tree == "T3")
            .count();
        assert_eq!(filtered.len(), expected);
        assert!(filtered.rows().iter().all(|r| selection.contains(&r.tree)));
    }

    #[test]
    fn test_select_empty_and_unknown() {
        assert!(select_entities(&sample(), &SelectionSet::default()).is_empty());
        assert!(select_entities(&sample(), &SelectionSet::new(["T9"])).is_empty());
        let filtered = select_entities(&sample(), &SelectionSet::new(["T9", "T2"]));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_select_idempotent() {
        let selection = SelectionSet::new(["T1", "T2"]);
        let once = select_entities(&sample(), &selection);
        let twice = select_entities(&once, &selection);
        assert_eq!(once, twice);
        assert_eq!(once, select_entities(&sample(), &selection));
    }

    #[test]
    fn test_query_inclusive_bound() {
        let filtered = select_entities(&sample(), &SelectionSet::new(["T1", "T2"]));
        let queried = query_by_age(&filtered, 118.0);
        assert_eq!(
            queried.rows(),
            &[
                Row::new("1", "T1", 118.0, 30.0),
                Row::new("3", "T2", 118.0, 33.0)
            ]
        );
    }

    #[test]
    fn test_query_monotonic() {
        let table = sample();
        let thresholds = [0.0, 117.9, 118.0, 300.0, 484.0, 10_000.0];
        for pair in thresholds.windows(2) {
            let lower = query_by_age(&table, pair[0]);
            let upper = query_by_age(&table, pair[1]);
            // Every row kept at the lower threshold appears, in order, at the higher one.
            let mut it = upper.rows().iter();
            assert!(lower.rows().iter().all(|r| it.any(|u| u == r)));
        }
    }
}
