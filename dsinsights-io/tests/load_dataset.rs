use dsinsights_core::stats::{per_capture_counts, total_counts};
use dsinsights_core::CaptureSource;
use dsinsights_io::{
    discover_metrics_files, load, load_rendered_object_info, Error, MetricsSource,
    RENDERED_OBJECT_INFO_DEFINITION_ID,
};
use std::fs;
use std::path::Path;

fn object(label_id: u32, label_name: &str, instance_id: u64, visible_pixels: u64) -> String {
    format!(
        r#"{{"label_id": {label_id}, "label_name": "{label_name}", "instance_id": {instance_id}, "visible_pixels": {visible_pixels}}}"#
    )
}

fn metric(capture_id: &str, definition: &str, values: &[String]) -> String {
    format!(
        r#"{{"capture_id": "{capture_id}", "annotation_id": null, "sequence_id": "s0", "step": 0,
            "metric_definition": "{definition}", "values": [{}]}}"#,
        values.join(",")
    )
}

fn write_metrics(path: &Path, metrics: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        path,
        format!(r#"{{"version": "0.0.1", "metrics": [{}]}}"#, metrics.join(",")),
    )
    .unwrap();
}

fn build_dataset(root: &Path) {
    let def = RENDERED_OBJECT_INFO_DEFINITION_ID;
    write_metrics(
        &root.join("Dataset/metrics_000.json"),
        &[
            metric(
                "cap-1",
                def,
                &[object(1, "cube", 1, 400), object(1, "cube", 2, 150)],
            ),
            metric("cap-1", "other-definition", &[]),
        ],
    );
    write_metrics(
        &root.join("Dataset/metrics_001.json"),
        &[
            metric(
                "cap-2",
                def,
                &[object(2, "sphere", 1, 90), object(1, "cube", 2, 10)],
            ),
            metric("cap-3", def, &[]),
        ],
    );
    fs::write(root.join("Dataset/captures_000.json"), "not json").unwrap();
}

#[test]
fn test_load_nested_dataset() {
    let dir = tempfile::tempdir().unwrap();
    build_dataset(dir.path());

    let files = discover_metrics_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);

    let table = load(dir.path(), RENDERED_OBJECT_INFO_DEFINITION_ID).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.capture_id, vec!["cap-1", "cap-1", "cap-2", "cap-2"]);

    let totals = total_counts(&table);
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].label_name, "cube");
    assert_eq!(totals[0].count, 3);

    // cap-3 has a record but no objects, so it has no per-capture row.
    let per_capture = per_capture_counts(&table);
    assert_eq!(per_capture.len(), 2);
}

#[test]
fn test_metrics_source() {
    let dir = tempfile::tempdir().unwrap();
    build_dataset(dir.path());

    let source = MetricsSource::rendered_object_info(dir.path());
    assert_eq!(source.definition_id(), RENDERED_OBJECT_INFO_DEFINITION_ID);
    let table = source.load().unwrap();
    assert_eq!(table.len(), 4);

    let info = load_rendered_object_info(dir.path(), RENDERED_OBJECT_INFO_DEFINITION_ID).unwrap();
    assert_eq!(info.num_captures(), 2);
    assert_eq!(info.label_names(), vec!["cube".to_string(), "sphere".to_string()]);
}

#[test]
fn test_missing_data_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = load(&missing, RENDERED_OBJECT_INFO_DEFINITION_ID).unwrap_err();
    assert!(matches!(err, Error::DataRootNotFound(_)));

    let source = MetricsSource::rendered_object_info(&missing);
    assert!(matches!(
        source.load(),
        Err(dsinsights_core::Error::Load(_))
    ));
}

#[test]
fn test_unknown_definition_id() {
    let dir = tempfile::tempdir().unwrap();
    build_dataset(dir.path());
    let err = load(dir.path(), "00000000-0000-0000-0000-000000000000").unwrap_err();
    assert!(matches!(err, Error::DefinitionIdNotFound { .. }));
}

#[test]
fn test_malformed_metrics_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("metrics_000.json"), "{\"metrics\": [}").unwrap();
    let err = load(dir.path(), RENDERED_OBJECT_INFO_DEFINITION_ID).unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
}
