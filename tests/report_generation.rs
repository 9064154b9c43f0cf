use tabular_summary::execution::ExecutionOptions;
use tabular_summary::report::{
    generate_report, AtomicFileSink, DatasetPreset, GroupingSpec, MemorySink, ReportFormat, ReportLayout,
    ReportOptions, ReportRequest,
};
use tabular_summary::SummaryError;

const SCORES_REPORT: &str = "\
============================================================
OVERALL DATASET SUMMARY
============================================================
Column: id
  - count: 3
  - mean: 1.3333
  - min: 1.0
  - max: 2.0
  - std: 0.4714

Column: score
  - count: 3
  - unique: 3
  - top: 10
  - freq: 1

============================================================
SUMMARY BY 'id'
============================================================
id = 1
  Column: id
    - count: 2
    - mean: 1.0
    - min: 1.0
    - max: 1.0
    - std: 0.0
  Column: score
    - count: 2
    - mean: 15.0
    - min: 10.0
    - max: 20.0
    - std: 5.0

id = 2
  Column: id
    - count: 1
    - mean: 2.0
    - min: 2.0
    - max: 2.0
    - std: 0.0
  Column: score
    - count: 1
    - unique: 1
    - top: abc
    - freq: 1

";

fn scores_layout() -> ReportLayout {
    ReportLayout::default().with_grouping(GroupingSpec::new(["id"]))
}

#[test]
fn text_report_matches_golden_output() {
    let mut sink = MemorySink::new();
    let stats = generate_report(
        "tests/fixtures/scores.csv",
        &scores_layout(),
        &mut sink,
        &ReportOptions::default(),
    )
    .unwrap();

    assert_eq!(sink.text(), SCORES_REPORT);
    assert_eq!(stats.rows, 3);
    assert_eq!(stats.columns, 2);
    assert_eq!(stats.sections, 2);
    assert_eq!(stats.groups, 2);
    assert_eq!(stats.lines, sink.lines().len());
}

#[test]
fn report_is_byte_identical_across_runs() {
    let layout = DatasetPreset::TwitterPosts.layout();
    let mut first = MemorySink::new();
    let mut second = MemorySink::new();
    generate_report("tests/fixtures/posts.csv", &layout, &mut first, &ReportOptions::default()).unwrap();
    generate_report("tests/fixtures/posts.csv", &layout, &mut second, &ReportOptions::default()).unwrap();
    assert_eq!(first.text(), second.text());
}

#[test]
fn composite_key_sections_render_pairs_in_key_order() {
    let mut sink = MemorySink::new();
    generate_report(
        "tests/fixtures/posts.csv",
        &DatasetPreset::TwitterPosts.layout(),
        &mut sink,
        &ReportOptions::default(),
    )
    .unwrap();

    let lines = sink.lines();
    assert_eq!(lines[1], "TWITTER POSTS DATASET - OVERALL SUMMARY");
    assert!(lines.iter().any(|l| l == "SUMMARY BY 'id'"));
    assert!(lines.iter().any(|l| l == "SUMMARY BY (id, url)"));

    let group_headers: Vec<&String> = lines.iter().filter(|l| l.starts_with("id = ")).collect();
    // Four groups by id, then five by (id, url), each in first-seen order.
    assert_eq!(group_headers.len(), 9);
    assert_eq!(group_headers[0], "id = 101");
    assert_eq!(group_headers[3], "id = 104");
    assert_eq!(group_headers[4], "id = 101, url = https://x.com/a/1");
    assert_eq!(group_headers[5], "id = 101, url = https://x.com/a/2");
}

#[test]
fn ads_preset_uses_custom_labels() {
    let input = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(input.path(), "page_id,ad_id,spend\n7,1,10\n7,2,20\n8,3,5\n").unwrap();

    let mut sink = MemorySink::new();
    generate_report(
        input.path(),
        &DatasetPreset::FacebookAds.layout(),
        &mut sink,
        &ReportOptions::default(),
    )
    .unwrap();

    let lines = sink.lines();
    assert!(lines.iter().any(|l| l == "SUMMARY BY PAGE_ID"));
    assert!(lines.iter().any(|l| l == "PAGE_ID = 7"));
    assert!(lines.iter().any(|l| l == "PAGE_ID = 7, AD_ID = 2"));
}

#[test]
fn json_report_contains_every_section() {
    let mut sink = MemorySink::new();
    let opts = ReportOptions {
        format: ReportFormat::Json,
        ..Default::default()
    };
    generate_report("tests/fixtures/scores.csv", &scores_layout(), &mut sink, &opts).unwrap();

    let value: serde_json::Value = serde_json::from_str(&sink.text()).unwrap();
    assert_eq!(value["rows"], 3);
    assert_eq!(value["overall"]["title"], "OVERALL DATASET SUMMARY");
    assert_eq!(value["overall"]["summary"][1]["name"], "score");
    assert_eq!(value["overall"]["summary"][1]["kind"], "categorical");

    let groups = &value["grouped"][0]["summary"]["groups"];
    assert_eq!(groups[0]["key"], serde_json::json!(["1"]));
    assert_eq!(groups[0]["summary"][1]["kind"], "numeric");
    assert_eq!(groups[0]["summary"][1]["mean"], 15.0);
    assert_eq!(groups[1]["summary"][1]["top"], "abc");
}

#[test]
fn parallel_groups_produce_the_same_report() {
    let layout = DatasetPreset::TwitterPosts.layout();
    let mut sequential = MemorySink::new();
    let mut parallel = MemorySink::new();

    generate_report("tests/fixtures/posts.csv", &layout, &mut sequential, &ReportOptions::default()).unwrap();
    let opts = ReportOptions {
        execution: ExecutionOptions {
            parallel_groups: true,
            num_threads: Some(3),
        },
        ..Default::default()
    };
    generate_report("tests/fixtures/posts.csv", &layout, &mut parallel, &opts).unwrap();

    assert_eq!(sequential.text(), parallel.text());
}

#[test]
fn unknown_grouping_column_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.txt");
    std::fs::write(&output, "previous report\n").unwrap();

    let layout = scores_layout().with_grouping(GroupingSpec::new(["id", "url"]));
    let mut sink = AtomicFileSink::new(&output);
    let err = generate_report("tests/fixtures/scores.csv", &layout, &mut sink, &ReportOptions::default())
        .unwrap_err();

    assert!(matches!(err, SummaryError::UnknownGroupColumn { ref column, .. } if column == "url"));
    assert!(err.to_string().contains("'url'"));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous report\n");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_input_leaves_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let request = ReportRequest::for_preset(
        "tests/fixtures/does_not_exist.csv",
        dir.path().join("report.txt"),
        DatasetPreset::FacebookPosts,
    );

    let err = request.run().unwrap_err();
    assert!(err.to_string().contains("does_not_exist.csv"));
    assert!(!request.output.exists());
}

#[test]
fn request_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let request = ReportRequest {
        input: "tests/fixtures/scores.csv".into(),
        output: dir.path().join("scores_report.txt"),
        layout: scores_layout(),
        options: ReportOptions::default(),
    };

    let stats = request.run().unwrap();
    assert_eq!(stats.groups, 2);
    assert_eq!(std::fs::read_to_string(&request.output).unwrap(), SCORES_REPORT);
}
