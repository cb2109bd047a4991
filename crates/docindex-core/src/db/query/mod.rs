//! Module: query
//! Responsibility: keys-only equality queries as issued by the uniqueness
//! checker, plus the window (ancestor/offset/limit) callers page with.
//! Does not own: execution; stores evaluate queries inside their transaction.

use crate::{PRIMARY_KEY, db::property::Property, key::Key, value::Value};

///
/// Filter
/// Exact-equality filter on one property.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub property: String,
    pub value: Value,
}

impl Filter {
    #[must_use]
    pub fn eq(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Evaluate against a stored document. `__key__` compares the row key.
    #[must_use]
    pub fn matches(&self, key: &Key, properties: &[Property]) -> bool {
        if self.property == PRIMARY_KEY {
            return self.value.as_key() == Some(key);
        }

        properties
            .iter()
            .any(|property| property.name == self.property && property.value == self.value)
    }
}

///
/// Query
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub kind: String,
    pub namespace: String,
    pub ancestor: Option<Key>,
    pub filters: Vec<Filter>,
    pub keys_only: bool,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl Query {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Restrict results to `ancestor` and its descendants.
    #[must_use]
    pub fn ancestor(mut self, ancestor: Key) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub const fn keys_only(mut self) -> Self {
        self.keys_only = true;
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a stored row satisfies kind, namespace, ancestor and filters.
    /// Offset and limit are applied by the executing store.
    #[must_use]
    pub fn matches(&self, key: &Key, properties: &[Property]) -> bool {
        if key.kind != self.kind || key.namespace != self.namespace {
            return false;
        }

        if let Some(ancestor) = &self.ancestor
            && !key.has_ancestor(ancestor)
        {
            return false;
        }

        self.filters
            .iter()
            .all(|filter| filter.matches(key, properties))
    }
}

///
/// QueryWindow
///
/// Caller-side paging parameters. Zero offset/limit mean "unset".
///

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryWindow {
    pub ancestor: Option<Key>,
    pub offset: usize,
    pub limit: usize,
}

impl QueryWindow {
    #[must_use]
    pub fn apply(&self, mut query: Query) -> Query {
        if let Some(ancestor) = &self.ancestor {
            query = query.ancestor(ancestor.clone());
        }

        if self.offset > 0 {
            query = query.offset(self.offset);
        }

        if self.limit > 0 {
            query = query.limit(self.limit);
        }

        query
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> (Key, Vec<Property>) {
        let key = Key::id("user", 1)
            .with_parent(Key::name("org", "acme"))
            .with_namespace("ns");

        (key, vec![Property::new("email", "x@example.com")])
    }

    #[test]
    fn matches_scopes_by_kind_namespace_and_filters() {
        let (key, props) = row();

        let query = Query::new("user")
            .namespace("ns")
            .filter(Filter::eq("email", "x@example.com"));
        assert!(query.matches(&key, &props));

        assert!(!Query::new("user").matches(&key, &props));
        assert!(!Query::new("org").namespace("ns").matches(&key, &props));
        assert!(
            !query
                .clone()
                .filter(Filter::eq("email", "y@example.com"))
                .matches(&key, &props)
        );
    }

    #[test]
    fn matches_honours_ancestor() {
        let (key, props) = row();

        let inside = Query::new("user")
            .namespace("ns")
            .ancestor(Key::name("org", "acme").with_namespace("ns"));
        let outside = Query::new("user")
            .namespace("ns")
            .ancestor(Key::name("org", "other").with_namespace("ns"));

        assert!(inside.matches(&key, &props));
        assert!(!outside.matches(&key, &props));
    }

    #[test]
    fn primary_key_filter_compares_row_key() {
        let (key, props) = row();
        let query = Query::new("user")
            .namespace("ns")
            .filter(Filter::eq(PRIMARY_KEY, key.clone()));

        assert!(query.matches(&key, &props));
    }

    #[test]
    fn window_only_sets_non_zero_bounds() {
        let window = QueryWindow {
            ancestor: Some(Key::name("agent", "007")),
            offset: 10,
            limit: 100,
        };
        let query = window.apply(Query::new("test"));

        assert_eq!(query.ancestor, Some(Key::name("agent", "007")));
        assert_eq!(query.offset, 10);
        assert_eq!(query.limit, Some(100));

        let query = QueryWindow::default().apply(Query::new("test"));
        assert_eq!(query, Query::new("test"));
    }
}
