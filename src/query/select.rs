//! Select query builder

use std::sync::Arc;

use crate::storage::{Record, RecordStore, Table};
use crate::value::Value;
use crate::{Error, Result};

use super::predicate::{matches_all, Operator, Predicate};

/// Projection requested by `select` / `select_all`.
///
/// Advisory only: terminal calls always return whole records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Columns(Vec<String>),
}

/// Builder for `select_from(table)` chains.
///
/// Joins, limits, offsets, ordering and grouping are accepted so chains
/// written against a SQL backend compile unchanged, but they do not affect
/// results.
#[derive(Debug, Clone)]
pub struct SelectQueryBuilder {
    store: Arc<RecordStore>,
    table: Table,
    selection: Selection,
    predicates: Vec<Predicate>,
}

impl SelectQueryBuilder {
    pub(crate) fn new(store: Arc<RecordStore>, table: Table) -> Self {
        Self {
            store,
            table,
            selection: Selection::All,
            predicates: Vec::new(),
        }
    }

    #[must_use]
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = Selection::Columns(columns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn select_all(mut self) -> Self {
        self.selection = Selection::All;
        self
    }

    /// Add a predicate, AND-ed with any existing ones
    #[must_use]
    pub fn where_(
        mut self,
        column: impl Into<String>,
        op: impl Into<Operator>,
        value: impl Into<Value>,
    ) -> Self {
        self.predicates.push(Predicate::compare(column, op, value));
        self
    }

    /// Add one predicate that holds when any of `predicates` holds
    #[must_use]
    pub fn where_any(mut self, predicates: Vec<Predicate>) -> Self {
        self.predicates.push(Predicate::any_of(predicates));
        self
    }

    #[must_use]
    pub fn left_join(self, _table: Table, _left: &str, _right: &str) -> Self {
        self
    }

    #[must_use]
    pub fn limit(self, _limit: u64) -> Self {
        self
    }

    #[must_use]
    pub fn offset(self, _offset: u64) -> Self {
        self
    }

    #[must_use]
    pub fn order_by(self, _column: &str) -> Self {
        self
    }

    #[must_use]
    pub fn group_by(self, _column: &str) -> Self {
        self
    }

    fn matching_rows(&self) -> Vec<Record> {
        self.store.read(|tables| {
            tables
                .read_all(self.table)
                .iter()
                .filter(|record| matches_all(record, &self.predicates))
                .cloned()
                .collect()
        })
    }

    /// Every record satisfying all predicates, in table order
    pub async fn execute(&self) -> Result<Vec<Record>> {
        let rows = self.matching_rows();
        tracing::debug!(
            table = %self.table,
            selection = ?self.selection,
            predicates = self.predicates.len(),
            rows = rows.len(),
            "select executed"
        );
        Ok(rows)
    }

    /// The first matching record, or `None`
    pub async fn execute_take_first(&self) -> Result<Option<Record>> {
        let rows = self.execute().await?;

        // A single-entity lookup that found nothing resolves to None
        // explicitly, before the general first-row rule.
        if rows.is_empty() && self.predicates.iter().any(Predicate::is_id_equality) {
            tracing::debug!(table = %self.table, "id lookup matched no rows");
            return Ok(None);
        }

        Ok(rows.into_iter().next())
    }

    /// The first matching record, or [`Error::NoRecordsFound`]
    pub async fn execute_take_first_or_throw(&self) -> Result<Record> {
        self.execute_take_first()
            .await?
            .ok_or(Error::NoRecordsFound { table: self.table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn seeded_store() -> Arc<RecordStore> {
        let store = Arc::new(RecordStore::new());
        store.seed(
            Table::Decision,
            vec![
                Record::new().with("id", "d1").with("assembly_id", "A").with("title", "Climate Change Initiative"),
                Record::new().with("id", "d2").with("assembly_id", "B").with("title", "Tax Reform Proposal"),
                Record::new().with("id", "d3").with("assembly_id", "A").with("title", "Education Budget Increase"),
                Record::new().with("id", "d4").with("title", "Orphan decision"),
            ],
        );
        store
    }

    fn ids(rows: &[Record]) -> Vec<String> {
        rows.iter()
            .filter_map(|r| r.get("id").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn test_filter_keeps_table_order() {
        let store = seeded_store();
        let rows = SelectQueryBuilder::new(store, Table::Decision)
            .where_("assembly_id", "=", "A")
            .execute()
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec!["d1", "d3"]);
    }

    #[tokio::test]
    async fn test_no_predicates_returns_everything() {
        let store = seeded_store();
        let rows = SelectQueryBuilder::new(store, Table::Decision)
            .select_all()
            .execute()
            .await
            .unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[tokio::test]
    async fn test_predicates_are_and_combined() {
        let store = seeded_store();
        let rows = SelectQueryBuilder::new(store, Table::Decision)
            .where_("assembly_id", "=", "A")
            .where_("title", "ilike", "%budget%")
            .execute()
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec!["d3"]);
    }

    #[tokio::test]
    async fn test_absent_field_never_equals() {
        let store = seeded_store();
        let rows = SelectQueryBuilder::new(store, Table::Decision)
            .where_("assembly_id", "=", Value::Null)
            .execute()
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_ignored_clauses_do_not_change_results() {
        let store = seeded_store();
        let plain = SelectQueryBuilder::new(Arc::clone(&store), Table::Decision)
            .execute()
            .await
            .unwrap();
        let decorated = SelectQueryBuilder::new(store, Table::Decision)
            .left_join(Table::Assembly, "assembly.id", "decision.assembly_id")
            .select(["decision.id", "decision.title"])
            .order_by("decision.date")
            .group_by("decision.id")
            .limit(1)
            .offset(2)
            .execute()
            .await
            .unwrap();
        assert_eq!(plain, decorated);
    }

    #[tokio::test]
    async fn test_take_first() {
        let store = seeded_store();
        let first = SelectQueryBuilder::new(Arc::clone(&store), Table::Decision)
            .where_("assembly_id", "=", "A")
            .execute_take_first()
            .await
            .unwrap();
        assert_eq!(first.unwrap().get("id"), Some(&Value::from("d1")));

        let missing = SelectQueryBuilder::new(store, Table::Decision)
            .where_("id", "=", "nope")
            .execute_take_first()
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_take_first_or_throw() {
        let store = seeded_store();
        let err = SelectQueryBuilder::new(Arc::clone(&store), Table::Decision)
            .where_("assembly_id", "=", "Z")
            .execute_take_first_or_throw()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoRecordsFound { table: Table::Decision }));
        assert_eq!(err.to_string(), "No records found in table decision");

        let row = SelectQueryBuilder::new(store, Table::Decision)
            .where_("assembly_id", "=", "B")
            .execute_take_first_or_throw()
            .await
            .unwrap();
        assert_eq!(row.get("id"), Some(&Value::from("d2")));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unknown_operator_inside_any_of_warns() {
        let store = seeded_store();
        let rows = SelectQueryBuilder::new(store, Table::Decision)
            .where_("assembly_id", "=", "B")
            .where_any(vec![
                Predicate::compare("title", "ilike", "%nothing%"),
                Predicate::compare("title", "similar to", "x"),
            ])
            .execute()
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec!["d2"]);
        assert!(logs_contain("unknown operator matches every row"));
    }
}
