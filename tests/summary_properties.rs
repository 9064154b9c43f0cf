use tabular_summary::ingestion::{load_csv_from_path, load_csv_from_str};
use tabular_summary::summary::{grouped_summary, partition, summarize, ColumnKind, ColumnSummary, RowSetSummary};
use tabular_summary::types::{Header, Row, Table};

/// Small deterministic generator so property checks cover many shapes without extra crates.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

fn synthetic_table(seed: u64, rows: usize) -> Table {
    let mut rng = Lcg(seed);
    let header = Header::new(["page", "ad", "spend", "impressions", "label"]);
    let data = (0..rows)
        .map(|_| {
            let spend = match rng.below(10) {
                0 => String::new(),
                1 => " ".to_string(),
                _ => format!("{}.{}", rng.below(500), rng.below(100)),
            };
            let impressions = if rng.below(50) == 0 {
                "unknown".to_string()
            } else {
                rng.below(10_000).to_string()
            };
            let mut row = vec![
                format!("p{}", rng.below(4)),
                format!("a{}", rng.below(6)),
                spend,
                impressions,
                ["x", "y", "z", ""][rng.below(4) as usize].to_string(),
            ];
            if rng.below(20) == 0 {
                row.truncate(3);
            }
            row
        })
        .collect();
    Table::new(header, data)
}

fn check_invariants(summary: &RowSetSummary) {
    for column in summary.columns() {
        match &column.summary {
            ColumnSummary::Numeric(s) => {
                assert!(s.count > 0, "numeric column '{}' without values", column.name);
                // Allow for summation rounding when every value is equal.
                let eps = 1e-9 * s.min.abs().max(s.max.abs()).max(1.0);
                assert!(s.min <= s.mean + eps && s.mean <= s.max + eps, "column '{}': {s:?}", column.name);
                assert!(s.std >= 0.0);
            }
            ColumnSummary::Categorical(s) => {
                assert!(s.freq <= s.count);
                assert_eq!(s.unique == 0, s.count == 0);
                assert_eq!(s.top.is_none(), s.count == 0);
            }
        }
    }
}

#[test]
fn numeric_and_categorical_invariants_hold() {
    for seed in 1..20 {
        let table = synthetic_table(seed, 200);
        check_invariants(&summarize(&table.header, &table.rows));

        let grouped = grouped_summary(&table.header, &table.rows, &["page", "ad"]).unwrap();
        for summary in grouped.groups().values() {
            assert_eq!(summary.len(), table.header.len());
            check_invariants(summary);
        }
    }
}

#[test]
fn partition_is_an_exact_cover() {
    for seed in 1..10 {
        let table = synthetic_table(seed, 300);
        for keys in [vec!["page"], vec!["page", "ad"], vec!["label", "page"]] {
            let p = partition(&table.header, &table.rows, &keys).unwrap();

            let mut flattened: Vec<&Row> = p.flatten();
            assert_eq!(flattened.len(), table.row_count());

            let mut original: Vec<&Row> = table.rows.iter().collect();
            flattened.sort();
            original.sort();
            assert_eq!(flattened, original);

            // Every row sits in the bucket matching its own key.
            for (key, rows) in p.buckets() {
                for row in rows {
                    for (component, name) in key.values().iter().zip(p.key_columns()) {
                        let idx = table.header.index_of(name).unwrap();
                        assert_eq!(row.get(idx).map(String::as_str).unwrap_or(""), component.as_str());
                    }
                }
            }
        }
    }
}

#[test]
fn regrouped_rows_keep_numeric_extrema_and_counts() {
    for seed in 1..10 {
        let table = synthetic_table(seed, 250);
        let p = partition(&table.header, &table.rows, &["ad", "page"]).unwrap();

        let direct = summarize(&table.header, &table.rows);
        let regrouped = summarize(&table.header, &p.flatten());

        for (a, b) in direct.columns().iter().zip(regrouped.columns()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.summary.kind(), b.summary.kind());
            assert_eq!(a.summary.count(), b.summary.count());
            if let (Some(x), Some(y)) = (a.summary.as_numeric(), b.summary.as_numeric()) {
                assert_eq!(x.min, y.min);
                assert_eq!(x.max, y.max);
            }
        }
    }
}

#[test]
fn mixed_column_scenario() {
    let table = load_csv_from_path("tests/fixtures/scores.csv").unwrap();

    let overall = summarize(&table.header, &table.rows);
    let score = overall.get("score").unwrap().as_categorical().unwrap();
    assert_eq!(score.count, 3);
    assert_eq!(score.unique, 3);
    assert_eq!(score.top.as_deref(), Some("10"));
    assert_eq!(score.freq, 1);

    let by_id = grouped_summary(&table.header, &table.rows, &["id"]).unwrap();
    let keys: Vec<&[String]> = by_id.groups().keys().map(|k| k.values()).collect();
    assert_eq!(keys, vec![&["1".to_string()][..], &["2".to_string()][..]]);

    let one = by_id.get(&["1"]).unwrap().get("score").unwrap().as_numeric().unwrap();
    assert_eq!(one.count, 2);
    assert_eq!(one.mean, 15.0);
    assert_eq!(one.min, 10.0);
    assert_eq!(one.max, 20.0);
    assert_eq!(one.std, 5.0);

    let two = by_id.get(&["2"]).unwrap().get("score").unwrap().as_categorical().unwrap();
    assert_eq!(two.count, 1);
    assert_eq!(two.unique, 1);
    assert_eq!(two.top.as_deref(), Some("abc"));
    assert_eq!(two.freq, 1);
}

#[test]
fn blank_row_never_reaches_a_summary() {
    let with_blank = load_csv_from_str("a,b\n1,x\n  ,  \n2,y\n").unwrap();
    let without = load_csv_from_str("a,b\n1,x\n2,y\n").unwrap();
    assert_eq!(with_blank.row_count(), 2);
    assert_eq!(
        summarize(&with_blank.header, &with_blank.rows),
        summarize(&without.header, &without.rows)
    );
}

#[test]
fn posts_fixture_overall_summary() {
    let table = load_csv_from_path("tests/fixtures/posts.csv").unwrap();
    let overall = summarize(&table.header, &table.rows);

    let id = overall.get("id").unwrap().as_numeric().unwrap();
    assert_eq!((id.count, id.min, id.max), (8, 101.0, 104.0));

    // "n/a" turns likes categorical for the full dataset.
    assert_eq!(overall.get("likes").unwrap().kind(), ColumnKind::Categorical);

    let shares = overall.get("shares").unwrap().as_numeric().unwrap();
    assert_eq!(shares.count, 7);
    assert_eq!(shares.max, 100.0);
    assert_eq!(shares.min, 0.0);

    let lang = overall.get("lang").unwrap().as_categorical().unwrap();
    assert_eq!((lang.count, lang.unique, lang.freq), (6, 3, 4));
    assert_eq!(lang.top.as_deref(), Some("en"));

    let text = overall.get("text").unwrap().as_categorical().unwrap();
    assert_eq!(text.top.as_deref(), Some("Big rally"));
    assert_eq!(text.freq, 2);
}

#[test]
fn column_kind_is_decided_per_group() {
    let table = load_csv_from_path("tests/fixtures/posts.csv").unwrap();
    let by_id = grouped_summary(&table.header, &table.rows, &["id"]).unwrap();

    let likes_101 = by_id.get(&["101"]).unwrap().get("likes").unwrap();
    assert_eq!(likes_101.kind(), ColumnKind::Numeric);
    assert_eq!(likes_101.as_numeric().unwrap().mean, 9.0);

    let likes_102 = by_id.get(&["102"]).unwrap().get("likes").unwrap();
    assert_eq!(likes_102.kind(), ColumnKind::Categorical);

    // Ragged row: the missing text cell is blank, so 104's text column is empty.
    let text_104 = by_id.get(&["104"]).unwrap().get("text").unwrap();
    assert_eq!(text_104.count(), 0);
}
