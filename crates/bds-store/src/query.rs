//! Table queries: filters and ordering over JSON rows.
//!
//! Comparison rules:
//! - numbers compare numerically
//! - strings compare lexicographically, so ISO dates order correctly
//! - a numeric string compared with a number compares as text
//! - null or missing values never satisfy a filter

use std::cmp::Ordering;

use serde_json::{Map, Value};

/// A single row: column name to value.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Gte(String, Value),
    Lte(String, Value),
    In(String, Vec<Value>),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(column.into(), value.into())
    }

    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Gte(column.into(), value.into())
    }

    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Lte(column.into(), value.into())
    }

    pub fn is_in<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::In(column.into(), values.into_iter().map(Into::into).collect())
    }

    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(column, _)
            | Filter::Gte(column, _)
            | Filter::Lte(column, _)
            | Filter::In(column, _) => column,
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        let Some(cell) = row.get(self.column()).filter(|value| !value.is_null()) else {
            return false;
        };
        match self {
            Filter::Eq(_, expected) => compare_values(cell, expected) == Some(Ordering::Equal),
            Filter::Gte(_, bound) => matches!(
                compare_values(cell, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Filter::Lte(_, bound) => matches!(
                compare_values(cell, bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Filter::In(_, candidates) => candidates
                .iter()
                .any(|candidate| compare_values(cell, candidate) == Some(Ordering::Equal)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Descending,
        }
    }
}

/// A select against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
}

impl Query {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Restrict `column` to the inclusive range `[from, to]`.
    #[must_use]
    pub fn between(
        self,
        column: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        let column = column.into();
        self.filter(Filter::gte(column.clone(), from))
            .filter(Filter::lte(column, to))
    }

    #[must_use]
    pub fn order_by(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|filter| filter.matches(row))
    }

    /// Keep matching rows and sort them. Rows missing an order column sort
    /// after rows that have it, in either direction.
    pub fn apply(&self, rows: impl IntoIterator<Item = Row>) -> Vec<Row> {
        let mut selected: Vec<Row> = rows.into_iter().filter(|row| self.matches(row)).collect();
        if !self.order.is_empty() {
            selected.sort_by(|left, right| self.compare_rows(left, right));
        }
        selected
    }

    fn compare_rows(&self, left: &Row, right: &Row) -> Ordering {
        for order in &self.order {
            let l = left.get(&order.column).filter(|value| !value.is_null());
            let r = right.get(&order.column).filter(|value| !value.is_null());
            let ordering = match (l, r) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(l), Some(r)) => {
                    let natural = compare_values(l, r).unwrap_or(Ordering::Equal);
                    match order.direction {
                        Direction::Ascending => natural,
                        Direction::Descending => natural.reverse(),
                    }
                }
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Compare two cell values; `None` when they are not comparable.
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.as_f64()?.partial_cmp(&r.as_f64()?),
        (Value::String(l), Value::String(r)) => Some(l.as_str().cmp(r.as_str())),
        (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
        (Value::String(l), Value::Number(r)) => Some(l.as_str().cmp(r.to_string().as_str())),
        (Value::Number(l), Value::String(r)) => Some(l.to_string().as_str().cmp(r.as_str())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_between_is_inclusive_on_iso_dates() {
        let query = Query::table("bleeding").between("bleeding_date", "2024-01-01", "2024-01-31");
        assert!(query.matches(&row(json!({"bleeding_date": "2024-01-01"}))));
        assert!(query.matches(&row(json!({"bleeding_date": "2024-01-31"}))));
        assert!(!query.matches(&row(json!({"bleeding_date": "2024-02-01"}))));
        assert!(!query.matches(&row(json!({"bleeding_date": null}))));
        assert!(!query.matches(&row(json!({}))));
    }

    #[test]
    fn test_eq_matches_number_and_numeric_string() {
        let filter = Filter::eq("id", "42");
        assert!(filter.matches(&row(json!({"id": 42}))));
        assert!(filter.matches(&row(json!({"id": "42"}))));
        assert!(!filter.matches(&row(json!({"id": 7}))));
    }

    #[test]
    fn test_order_puts_missing_last() {
        let query = Query::table("t").order_by(Order::desc("n"));
        let rows = query.apply(vec![
            row(json!({"n": 1})),
            row(json!({})),
            row(json!({"n": 3})),
        ]);
        let values: Vec<Option<i64>> = rows
            .iter()
            .map(|r| r.get("n").and_then(Value::as_i64))
            .collect();
        assert_eq!(values, vec![Some(3), Some(1), None]);
    }

    #[test]
    fn test_in_filter() {
        let filter = Filter::is_in("bag_no", ["B-1", "B-2"]);
        assert!(filter.matches(&row(json!({"bag_no": "B-2"}))));
        assert!(!filter.matches(&row(json!({"bag_no": "B-3"}))));
    }
}
