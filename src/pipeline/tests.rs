use super::*;
use chrono::TimeZone;
use tempfile::tempdir;

fn pipeline_without_dx(input: &Path, output: &Path) -> Pipeline {
    Pipeline::new(PipelineConfig {
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        skip_dx: true,
        ..PipelineConfig::default()
    })
}

#[test]
fn test_source_kind_case_insensitive() {
    assert_eq!(
        SourceKind::from_path(Path::new("a/RUN.ACAML")),
        Some(SourceKind::Acaml)
    );
    assert_eq!(SourceKind::from_path(Path::new("x.Dx")), Some(SourceKind::Dx));
    assert_eq!(SourceKind::from_path(Path::new("notes.txt")), None);
    assert_eq!(SourceKind::from_path(Path::new("Makefile")), None);
}

#[test]
fn test_output_paths() {
    let now = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();

    let renamed = SourceFile::new("/d/sample.MFX").unwrap();
    assert_eq!(renamed.output_path(&now), Path::new("/d/sample_MFX.xml"));

    let scml = SourceFile::new("/d/tray.scml").unwrap();
    assert_eq!(scml.output_path(&now), Path::new("/d/tray_scml.xml"));

    let dx = SourceFile::new("/d/run.dx").unwrap();
    assert_eq!(dx.output_path(&now), Path::new("/d/run"));

    let xml = SourceFile::new("/d/sample_acaml.xml").unwrap();
    assert_eq!(
        xml.output_path(&now),
        Path::new("/d/sample_acaml_20240305_140709.txt")
    );
}

#[test]
fn test_discover_filters_and_sorts() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("b/nested")).unwrap();
    fs::write(dir.path().join("b/nested/z.acmd"), "").unwrap();
    fs::write(dir.path().join("a.acaml"), "").unwrap();
    fs::write(dir.path().join("c.scml"), "").unwrap();
    fs::write(dir.path().join("readme.txt"), "").unwrap();

    let found = discover(dir.path(), Stage::RenameProprietaryToXml.kinds());
    let names: Vec<_> = found
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["a.acaml", "z.acmd"]);
}

#[test]
fn test_commit_requires_output() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("run.acaml");
    fs::write(&source, "<ACAML/>").unwrap();

    let result = ConversionResult {
        source: SourceFile::new(&source).unwrap(),
        output: dir.path().join("run_acaml.xml"),
        outcome: Outcome::Converted,
    };

    assert!(!commit(&result).unwrap());
    assert!(source.exists());
}

#[test]
fn test_commit_ignores_failures_and_skips() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("run.acaml");
    let output = dir.path().join("run_acaml.xml");
    fs::write(&source, "<ACAML/>").unwrap();
    fs::write(&output, "<ACAML/>").unwrap();

    for outcome in [Outcome::Skipped, Outcome::Failed("boom".to_string())] {
        let result = ConversionResult {
            source: SourceFile::new(&source).unwrap(),
            output: output.clone(),
            outcome,
        };
        assert!(!commit(&result).unwrap());
        assert!(source.exists());
    }
}

#[test]
fn test_rename_stage_skips_existing_output() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("run.acaml");
    let existing = dir.path().join("run_acaml.xml");
    fs::write(&source, "new").unwrap();
    fs::write(&existing, "old").unwrap();

    let pipeline = Pipeline::default();
    let stats = pipeline.run_stage(Stage::RenameProprietaryToXml, dir.path());

    assert_eq!(stats.discovered, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.removed, 0);
    assert!(source.exists());
    assert_eq!(fs::read_to_string(&existing).unwrap(), "old");
}

#[test]
fn test_rename_stage_converts_and_removes() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("method.mfx");
    fs::write(&source, "<Method/>").unwrap();

    let stats = Pipeline::default().run_stage(Stage::RenameProprietaryToXml, dir.path());

    assert_eq!(stats.converted, 1);
    assert_eq!(stats.removed, 1);
    assert!(!source.exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("method_mfx.xml")).unwrap(),
        "<Method/>"
    );
}

#[test]
fn test_scml_failure_keeps_source() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("bad.scml");
    fs::write(
        &source,
        r#"<Root><XmlContent contentType="GZipCompressedBase64Xml">!!!not base64</XmlContent></Root>"#,
    )
    .unwrap();

    let stats = Pipeline::default().run_stage(Stage::ConvertEncodedXmlContainer, dir.path());

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.removed, 0);
    assert!(source.exists());
    assert!(!dir.path().join("bad_scml.xml").exists());
}

#[test]
fn test_report_stage_writes_text_and_removes_xml() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("odd.xml");
    fs::write(&source, "<Bogus/>").unwrap();

    let stats = Pipeline::default().run_stage(Stage::ParseXmlToReport, dir.path());

    assert_eq!(stats.converted, 1);
    assert!(!source.exists());

    let reports: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(reports.len(), 1);
    let name = reports[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("odd_") && name.ends_with(".txt"));
    let text = fs::read_to_string(&reports[0]).unwrap();
    assert!(text.starts_with("Unknown XML type: Bogus"));
}

#[test]
fn test_malformed_xml_still_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.xml"), "<a><b></a>").unwrap();

    let stats = Pipeline::default().run_stage(Stage::ParseXmlToReport, dir.path());

    assert_eq!(stats.converted, 1);
    let report = fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap();
    let text = fs::read_to_string(report.path()).unwrap();
    assert!(text.starts_with("Error processing file:"));
    assert!(text.ends_with("<a><b></a>"));
}

#[test]
fn test_skip_dx_leaves_files() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::write(input.path().join("run.dx"), "binary").unwrap();

    let summary = pipeline_without_dx(input.path(), output.path()).run().unwrap();

    let dx = summary.stage(Stage::ConvertExternalFormat).unwrap();
    assert_eq!(dx.discovered, 0);
    assert!(output.path().join("run.dx").exists());
}

#[test]
fn test_copy_tree_leaves_input_untouched() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::create_dir(input.path().join("batch")).unwrap();
    fs::write(input.path().join("batch/run.acaml"), "<ACAML/>").unwrap();
    fs::write(input.path().join("loose.mfx"), "<M/>").unwrap();

    let copied = copy_tree(input.path(), output.path()).unwrap();

    assert_eq!(copied, 2);
    assert!(output.path().join("batch/run.acaml").exists());
    assert!(output.path().join("loose.mfx").exists());
    assert!(input.path().join("batch/run.acaml").exists());
}

#[test]
fn test_copy_tree_replaces_stale_copy() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::create_dir(input.path().join("batch")).unwrap();
    fs::write(input.path().join("batch/a.xml"), "<A/>").unwrap();
    fs::create_dir(output.path().join("batch")).unwrap();
    fs::write(output.path().join("batch/stale.txt"), "old").unwrap();

    copy_tree(input.path(), output.path()).unwrap();

    assert!(output.path().join("batch/a.xml").exists());
    assert!(!output.path().join("batch/stale.txt").exists());
}

#[test]
fn test_copy_tree_rejects_nested_output() {
    let input = tempdir().unwrap();
    let nested = input.path().join("Output");

    let result = copy_tree(input.path(), &nested);
    assert!(matches!(result, Err(PipelineError::NestedOutput { .. })));
}

#[test]
fn test_copy_tree_rejects_input_inside_output() {
    let output = tempdir().unwrap();
    let input = output.path().join("data");
    fs::create_dir(&input).unwrap();
    fs::create_dir(input.join("data")).unwrap();
    fs::write(input.join("data/run.acaml"), "<ACAML/>").unwrap();

    let result = copy_tree(&input, output.path());

    assert!(matches!(result, Err(PipelineError::NestedOutput { .. })));
    assert!(input.join("data/run.acaml").exists());
}

#[cfg(unix)]
fn dx_pipeline(script_dir: &Path, body: &str) -> Pipeline {
    let script = script_dir.join("convert.sh");
    fs::write(&script, body).unwrap();
    Pipeline::new(PipelineConfig {
        dx: DxConverter::new()
            .with_interpreter("sh")
            .with_interpreter_args(Vec::new())
            .with_script(script),
        ..PipelineConfig::default()
    })
}

#[cfg(unix)]
#[test]
fn test_dx_stage_converts_and_removes() {
    let root = tempdir().unwrap();
    let scripts = tempdir().unwrap();
    let source = root.path().join("run.dx");
    fs::write(&source, "dx").unwrap();

    let pipeline = dx_pipeline(scripts.path(), "mkdir \"${1%.dx}\" && echo \"$2\" > \"${1%.dx}/mode.txt\"\n");
    let stats = pipeline.run_stage(Stage::ConvertExternalFormat, root.path());

    assert_eq!(stats.discovered, 1);
    assert_eq!(stats.converted, 1);
    assert_eq!(stats.removed, 1);
    assert!(!source.exists());
    assert_eq!(
        fs::read_to_string(root.path().join("run/mode.txt")).unwrap().trim(),
        "clean"
    );
}

#[cfg(unix)]
#[test]
fn test_dx_stage_skips_existing_directory() {
    let root = tempdir().unwrap();
    let scripts = tempdir().unwrap();
    let source = root.path().join("run.dx");
    fs::write(&source, "dx").unwrap();
    fs::create_dir(root.path().join("run")).unwrap();

    let pipeline = dx_pipeline(scripts.path(), "touch \"${1%.dx}/ran\"\n");
    let stats = pipeline.run_stage(Stage::ConvertExternalFormat, root.path());

    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.removed, 0);
    assert!(source.exists());
    assert!(!root.path().join("run/ran").exists());
}

#[cfg(unix)]
#[test]
fn test_dx_stage_keeps_source_without_output() {
    let root = tempdir().unwrap();
    let scripts = tempdir().unwrap();
    let source = root.path().join("run.dx");
    fs::write(&source, "dx").unwrap();

    let pipeline = dx_pipeline(scripts.path(), "exit 0\n");
    let stats = pipeline.run_stage(Stage::ConvertExternalFormat, root.path());

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.removed, 0);
    assert!(source.exists());
}

#[test]
fn test_missing_input_dir() {
    let dir = tempdir().unwrap();
    let result = copy_tree(&dir.path().join("absent"), &dir.path().join("out"));
    assert!(matches!(result, Err(PipelineError::InputDirMissing(_))));
}
