//! Grouping engine: partition rows by a composite key and summarize each partition.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::error::{SummaryError, SummaryResult};
use crate::types::{cell, Header, Row};

use super::compose::{summarize, RowSetSummary};

/// Ordered tuple of raw cell values, one per grouping column.
///
/// Values are taken verbatim from the row; no trimming or type coercion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<String>);

impl GroupKey {
    /// Key components in grouping-column order.
    pub fn values(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// Resolve grouping column names to header positions.
///
/// Fails on an empty key list or on the first name not present in the header.
pub fn resolve_key_columns<S: AsRef<str>>(header: &Header, keys: &[S]) -> SummaryResult<Vec<usize>> {
    if keys.is_empty() {
        return Err(SummaryError::EmptyGroupKeys);
    }
    keys.iter()
        .map(|k| {
            let k = k.as_ref();
            header
                .index_of(k)
                .ok_or_else(|| SummaryError::UnknownGroupColumn {
                    column: k.to_owned(),
                    header: header.names().to_vec(),
                })
        })
        .collect()
}

/// Rows bucketed by [`GroupKey`], in first-seen key order.
///
/// Buckets borrow rows from the source table; each source row lands in exactly one bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    key_columns: Vec<String>,
    buckets: IndexMap<GroupKey, Vec<&'a Row>>,
}

impl<'a> Partition<'a> {
    /// Grouping column names, in caller order.
    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    /// Buckets in first-seen order.
    pub fn buckets(&self) -> &IndexMap<GroupKey, Vec<&'a Row>> {
        &self.buckets
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// All rows, group by group, in grouped order.
    pub fn flatten(&self) -> Vec<&'a Row> {
        self.buckets.values().flatten().copied().collect()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, IndexMap<GroupKey, Vec<&'a Row>>) {
        (self.key_columns, self.buckets)
    }
}

/// Partition `rows` by the values at the `keys` columns.
///
/// Keys are validated against the header before any row is examined. A short row contributes a
/// blank component for key positions past its end.
pub fn partition<'a, S: AsRef<str>>(
    header: &Header,
    rows: &'a [Row],
    keys: &[S],
) -> SummaryResult<Partition<'a>> {
    let idxs = resolve_key_columns(header, keys)?;

    let mut buckets: IndexMap<GroupKey, Vec<&'a Row>> = IndexMap::new();
    for row in rows {
        let key = GroupKey(idxs.iter().map(|&i| cell(row, i).to_owned()).collect());
        buckets.entry(key).or_default().push(row);
    }

    Ok(Partition {
        key_columns: keys.iter().map(|k| k.as_ref().to_owned()).collect(),
        buckets,
    })
}

/// Per-group summaries keyed by [`GroupKey`], in first-seen group order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSummary {
    key_columns: Vec<String>,
    groups: IndexMap<GroupKey, RowSetSummary>,
}

impl GroupedSummary {
    /// Assemble a grouped summary from already-computed groups.
    pub fn new(key_columns: Vec<String>, groups: IndexMap<GroupKey, RowSetSummary>) -> Self {
        Self {
            key_columns,
            groups,
        }
    }

    /// Grouping column names, in caller order.
    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    /// Groups in first-seen order.
    pub fn groups(&self) -> &IndexMap<GroupKey, RowSetSummary> {
        &self.groups
    }

    /// Summary for one group, looked up by its raw key values.
    pub fn get<S: AsRef<str>>(&self, key: &[S]) -> Option<&RowSetSummary> {
        let key = GroupKey(key.iter().map(|k| k.as_ref().to_owned()).collect());
        self.groups.get(&key)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for GroupedSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Groups<'g>(&'g IndexMap<GroupKey, RowSetSummary>);

        impl Serialize for Groups<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                #[derive(Serialize)]
                struct Group<'k> {
                    key: &'k GroupKey,
                    summary: &'k RowSetSummary,
                }

                let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
                for (key, summary) in self.0 {
                    seq.serialize_element(&Group { key, summary })?;
                }
                seq.end()
            }
        }

        let mut st = serializer.serialize_struct("GroupedSummary", 2)?;
        st.serialize_field("key_columns", &self.key_columns)?;
        st.serialize_field("groups", &Groups(&self.groups))?;
        st.end()
    }
}

/// Group `rows` by `keys` and summarize each group over the full header.
///
/// Grouping columns stay in every group's summary, where they collapse to the group value.
pub fn grouped_summary<S: AsRef<str>>(
    header: &Header,
    rows: &[Row],
    keys: &[S],
) -> SummaryResult<GroupedSummary> {
    let (key_columns, buckets) = partition(header, rows, keys)?.into_parts();
    let groups = buckets
        .into_iter()
        .map(|(key, group_rows)| {
            let summary = summarize(header, &group_rows);
            (key, summary)
        })
        .collect();
    Ok(GroupedSummary::new(key_columns, groups))
}

#[cfg(test)]
mod tests {
    use super::{grouped_summary, partition, GroupKey};
    use crate::error::SummaryError;
    use crate::types::{Header, Row};

    fn rows(data: &[&[&str]]) -> Vec<Row> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn partition_preserves_first_seen_order() {
        let header = Header::new(["g", "v"]);
        let data = rows(&[&["b", "1"], &["a", "2"], &["b", "3"], &["c", "4"]]);
        let p = partition(&header, &data, &["g"]).unwrap();
        let keys: Vec<String> = p.buckets().keys().map(|k| k.0[0].clone()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(p.buckets()[&GroupKey(vec!["b".into()])].len(), 2);
    }

    #[test]
    fn keys_compare_verbatim() {
        let header = Header::new(["g"]);
        let data = rows(&[&["1"], &["1.0"], &[" 1"], &["1"]]);
        let p = partition(&header, &data, &["g"]).unwrap();
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn composite_key_follows_caller_order() {
        let header = Header::new(["a", "b", "v"]);
        let data = rows(&[&["x", "y", "1"]]);
        let g = grouped_summary(&header, &data, &["b", "a"]).unwrap();
        assert_eq!(g.key_columns(), &["b".to_string(), "a".to_string()]);
        assert!(g.get(&["y", "x"]).is_some());
        assert!(g.get(&["x", "y"]).is_none());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let header = Header::new(["a"]);
        let data = rows(&[&["1"]]);
        let err = partition(&header, &data, &["nope"]).unwrap_err();
        assert!(matches!(err, SummaryError::UnknownGroupColumn { ref column, .. } if column == "nope"));
    }

    #[test]
    fn empty_key_list_is_rejected() {
        let header = Header::new(["a"]);
        let err = partition::<&str>(&header, &[], &[]).unwrap_err();
        assert!(matches!(err, SummaryError::EmptyGroupKeys));
    }

    #[test]
    fn grouping_columns_stay_in_group_summaries() {
        let header = Header::new(["id", "score"]);
        let data = rows(&[&["1", "10"], &["1", "20"], &["2", "abc"]]);
        let g = grouped_summary(&header, &data, &["id"]).unwrap();

        let one = g.get(&["1"]).unwrap();
        assert_eq!(one.len(), 2);
        let id = one.get("id").unwrap().as_numeric().unwrap();
        assert_eq!((id.count, id.min, id.max, id.std), (2, 1.0, 1.0, 0.0));
    }

    #[test]
    fn key_display_joins_components() {
        let key = GroupKey(vec!["1".into(), "u".into()]);
        assert_eq!(key.to_string(), "(1, u)");
    }
}
