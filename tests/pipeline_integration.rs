//! Integration tests for the batch pipeline
//!
//! These tests build a small data tree, run every stage and inspect the
//! converted copy.

use base64::prelude::*;
use flate2::write::GzEncoder;
use flate2::Compression;
use labxml::pipeline::{Pipeline, PipelineConfig, Stage};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn gzip_base64(text: &str) -> String {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    BASE64_STANDARD.encode(encoder.finish().unwrap())
}

fn files_with_suffix(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut found: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.to_string_lossy().ends_with(suffix))
        .collect();
    found.sort();
    found
}

fn config(input: &Path, output: &Path) -> PipelineConfig {
    PipelineConfig {
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        skip_dx: true,
        ..PipelineConfig::default()
    }
}

/// An ACAML file is renamed in one stage and reported in a later one
#[test]
fn test_acaml_renamed_then_reported() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let batch = input.path().join("batch1");
    fs::create_dir(&batch).unwrap();
    fs::write(
        batch.join("sample.acaml"),
        r#"<?xml version="1.0" encoding="utf-8"?>
<ACAML xmlns="urn:schemas-agilent-com:acaml21">
  <Doc><DocID>d-1</DocID></Doc>
</ACAML>"#,
    )
    .unwrap();

    let summary = Pipeline::new(config(input.path(), output.path()))
        .run()
        .unwrap();

    let copied = output.path().join("batch1");
    assert!(!copied.join("sample.acaml").exists());
    // The renamed XML is itself consumed by the report stage
    assert!(!copied.join("sample_acaml.xml").exists());

    let reports = files_with_suffix(&copied, ".txt");
    assert_eq!(reports.len(), 1);
    let name = reports[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("sample_acaml_"));
    let text = fs::read_to_string(&reports[0]).unwrap();
    assert!(text.contains("=== ACAML XML ==="));
    assert!(text.contains("d-1"));

    // The source tree is untouched
    assert!(batch.join("sample.acaml").exists());

    let rename = summary.stage(Stage::RenameProprietaryToXml).unwrap();
    assert_eq!(rename.converted, 1);
    assert_eq!(rename.removed, 1);
    let report = summary.stage(Stage::ParseXmlToReport).unwrap();
    assert_eq!(report.converted, 1);
    assert_eq!(summary.total_failed(), 0);
}

/// SCML payloads are decoded before the report stage sees them
#[test]
fn test_scml_payload_decoded() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::write(
        input.path().join("tray.scml"),
        format!(
            "<SampleContainerInfo><ContainerDeviceInfo ModuleId=\"G7167B\"><SampleContainerDevice ContentType=\"GZipCompressedBase64Xml\"><XmlContent>{}</XmlContent></SampleContainerDevice></ContainerDeviceInfo></SampleContainerInfo>",
            gzip_base64("<Foo/>")
        ),
    )
    .unwrap();

    let summary = Pipeline::new(config(input.path(), output.path()))
        .run()
        .unwrap();

    assert_eq!(
        summary.stage(Stage::ConvertEncodedXmlContainer).unwrap().converted,
        1
    );
    assert!(!output.path().join("tray.scml").exists());

    let reports = files_with_suffix(output.path(), ".txt");
    assert_eq!(reports.len(), 1);
    let text = fs::read_to_string(&reports[0]).unwrap();
    assert!(text.contains("=== SampleContainerInfo XML ==="));
    assert!(text.contains("Decoded Device Content:\n<Foo/>"));
    assert!(!text.contains("payload not decoded"));
}

/// An input directory inside the output directory is refused
#[test]
fn test_input_inside_output_refused() {
    let root = tempdir().unwrap();
    let input = root.path().join("data");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("sample.acaml"), "<ACAML/>").unwrap();

    let result = Pipeline::new(config(&input, root.path())).run();

    assert!(result.is_err());
    let left: Vec<_> = fs::read_dir(&input).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(left, vec![std::ffi::OsString::from("sample.acaml")]);
}

/// Unknown XML falls through to the generic dump
#[test]
fn test_unknown_xml_dumped() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::write(input.path().join("odd.xml"), "<Bogus/>").unwrap();

    Pipeline::new(config(input.path(), output.path()))
        .run()
        .unwrap();

    let reports = files_with_suffix(output.path(), ".txt");
    assert_eq!(reports.len(), 1);
    let text = fs::read_to_string(&reports[0]).unwrap();
    assert!(text.starts_with("Unknown XML type: Bogus"));
    assert!(text.contains("Full Content:\n<Bogus/>"));
}

/// A broken file is isolated and the rest of the stage carries on
#[test]
fn test_failure_isolated() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::write(
        input.path().join("a_broken.scml"),
        "<Root><XmlContent>not*base64</XmlContent></Root>",
    )
    .unwrap();
    fs::write(
        input.path().join("b_good.scml"),
        format!("<Root><XmlContent>{}</XmlContent></Root>", gzip_base64("<Ok/>")),
    )
    .unwrap();

    let summary = Pipeline::new(config(input.path(), output.path()))
        .run()
        .unwrap();

    let scml = summary.stage(Stage::ConvertEncodedXmlContainer).unwrap();
    assert_eq!(scml.discovered, 2);
    assert_eq!(scml.failed, 1);
    assert_eq!(scml.converted, 1);
    assert!(output.path().join("a_broken.scml").exists());
    assert!(!output.path().join("b_good.scml").exists());
}

/// Running twice starts from a fresh copy each time
#[test]
fn test_rerun_replaces_copy() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let batch = input.path().join("batch");
    fs::create_dir(&batch).unwrap();
    fs::write(batch.join("m.mfx"), "<Method/>").unwrap();

    let pipeline = Pipeline::new(config(input.path(), output.path()));
    pipeline.run().unwrap();
    let second = pipeline.run().unwrap();

    assert_eq!(second.stage(Stage::RenameProprietaryToXml).unwrap().converted, 1);
    assert_eq!(files_with_suffix(&output.path().join("batch"), ".txt").len(), 1);
}

#[test]
fn test_missing_input_aborts() {
    let dir = tempdir().unwrap();
    let result = Pipeline::new(config(&dir.path().join("absent"), &dir.path().join("out"))).run();
    assert!(result.is_err());
    assert!(!dir.path().join("out").exists());
}
