//! End-to-end conversion scenarios.
//!
//! These tests drive `FileConverter` through its public API:
//! - Classification of paths
//! - In-process handlers writing real files
//! - Rejection before any tool is spawned
//! - Missing tools, with both the mock and the real process runner
//! - LibreOffice output reconciliation

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use fileconv_core::{
    classify,
    config::{Config, MarkupConfig, ToolsConfig},
    converter::{ConvertError, FileConverter},
    runner::{ProcessRunner, Tool, ToolOutput},
    testing::MockRunner,
    Format,
};

/// Test helper owning a converter over a mock runner and a scratch dir.
struct TestHarness {
    converter: FileConverter<MockRunner>,
    runner: MockRunner,
    dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_config(Config::default())
    }

    fn with_config(config: Config) -> Self {
        let runner = MockRunner::new();
        let converter = FileConverter::with_shared_runner(config, Arc::new(runner.clone()));
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            converter,
            runner,
            dir,
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// Makes `soffice` behave like LibreOffice: it writes
    /// `<outdir>/<input stem>.<target ext>` and ignores the requested name.
    async fn stub_soffice(&self, content: &'static str) {
        self.runner
            .on_run("soffice", move |args| {
                let out_dir = args
                    .iter()
                    .position(|a| a == "--outdir")
                    .map(|i| PathBuf::from(&args[i + 1]))
                    .expect("no --outdir");
                let target = args
                    .iter()
                    .position(|a| a == "--convert-to")
                    .map(|i| args[i + 1].split(':').next().unwrap_or_default().to_string())
                    .expect("no --convert-to");
                let input = PathBuf::from(args.last().expect("no input"));
                let stem = input.file_stem().expect("no stem").to_string_lossy();
                std::fs::write(out_dir.join(format!("{stem}.{target}")), content)
                    .expect("Failed to write office output");
                ToolOutput::ok()
            })
            .await;
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("Failed to read output")
}

#[test]
fn test_classification() {
    assert_eq!(classify("/a/B.TxT"), Format::Txt);
    assert_eq!(classify("/a/B.jpeg"), Format::Jpg);
    assert_eq!(classify("/a/B"), Format::Unknown);
    assert_eq!(classify("/a/.hidden"), Format::Unknown);
}

#[tokio::test]
async fn test_txt_to_csv_replaces_spaces() {
    let h = TestHarness::new();
    let input = h.write("in.txt", "Hello World Test File\nThis is a test\n");
    let output = h.path("out.csv");

    assert!(h.converter.convert(&input, &output).await);
    assert_eq!(read(&output), "Hello,World,Test,File\nThis,is,a,test\n");
    assert!(h.runner.invocations().await.is_empty());
}

#[tokio::test]
async fn test_csv_to_txt_replaces_commas() {
    let h = TestHarness::new();
    let input = h.write("in.csv", "name,age\r\nzoë,7\r\n");
    let output = h.path("out.txt");

    let outcome = h.converter.try_convert(&input, &output).await.unwrap();
    assert_eq!(outcome.handler, "csv-to-txt");
    assert_eq!(read(&output), "name age\r\nzoë 7\r\n");
}

#[tokio::test]
async fn test_cross_category_rejected_without_spawning() {
    let h = TestHarness::new();

    let err = h.converter.try_convert("a.pdf", "b.txt").await.unwrap_err();
    assert!(matches!(
        err,
        ConvertError::UnsupportedPair {
            input: Format::Pdf,
            output: Format::Txt
        }
    ));
    assert!(err.diagnostic().contains("pdf -> txt"));

    assert!(!h.converter.convert("a.pdf", "b.txt").await);
    assert!(h.runner.invocations().await.is_empty());
}

#[tokio::test]
async fn test_unknown_extension_rejected_without_spawning() {
    let h = TestHarness::new();

    let err = h.converter.try_convert("notes", "notes.md").await.unwrap_err();
    assert!(matches!(err, ConvertError::UnknownFormat { ref path } if path.ends_with("notes")));
    assert!(h.runner.invocations().await.is_empty());
}

#[tokio::test]
async fn test_missing_markup_tool() {
    let h = TestHarness::new();
    h.runner.set_available("pandoc", false).await;
    let input = h.write("a.md", "# Title\n");
    let output = h.path("b.html");

    let err = h.converter.try_convert(&input, &output).await.unwrap_err();
    assert!(matches!(err, ConvertError::ToolMissing { tool: Tool::Pandoc }));
    assert_eq!(err.to_string(), "pandoc is not installed");
    assert!(!output.exists());
    assert!(h.runner.runs().await.is_empty());
}

#[tokio::test]
async fn test_missing_markup_tool_with_process_runner() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.md");
    let output = dir.path().join("b.html");
    std::fs::write(&input, "# Title\n").unwrap();

    let config = Config {
        tools: ToolsConfig {
            pandoc: PathBuf::from("/nonexistent/bin/pandoc"),
            ..Default::default()
        },
        ..Default::default()
    };
    let converter = FileConverter::new(config, ProcessRunner::new());

    let err = converter.try_convert(&input, &output).await.unwrap_err();
    assert!(matches!(err, ConvertError::ToolMissing { tool: Tool::Pandoc }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_json_flatten() {
    let h = TestHarness::new();
    let input = h.write("doc.json", r#"{"a":1,"b":[true,null,{"c":"x"}]}"#);
    let output = h.path("doc.txt");

    let outcome = h.converter.try_convert(&input, &output).await.unwrap();
    assert_eq!(outcome.handler, "json-flatten");
    assert_eq!(read(&output), "a: 1\nb: \n  - true\n  - null\n  - \n    c: x\n");
}

#[tokio::test]
async fn test_json_flatten_rejects_invalid_document() {
    let h = TestHarness::new();
    let input = h.write("doc.json", "{not json");
    let output = h.path("doc.txt");

    let err = h.converter.try_convert(&input, &output).await.unwrap_err();
    assert!(matches!(err, ConvertError::Parse { .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_json_to_txt_external_first_falls_back() {
    let h = TestHarness::with_config(Config {
        markup: MarkupConfig {
            prefer_builtin: false,
        },
        ..Default::default()
    });
    h.runner.set_available("pandoc", false).await;
    let input = h.write("doc.json", r#"{"z":1,"a":2}"#);
    let output = h.path("doc.txt");

    let outcome = h.converter.try_convert(&input, &output).await.unwrap();
    assert_eq!(outcome.handler, "json-flatten");
    assert_eq!(read(&output), "z: 1\na: 2\n");
}

#[tokio::test]
async fn test_office_output_renamed_to_requested_path() {
    let h = TestHarness::new();
    h.stub_soffice("docx bytes").await;
    let input = h.write("src.pdf", "%PDF-1.4");
    let output = h.path("result.docx");

    assert!(h.converter.convert(&input, &output).await);
    assert_eq!(read(&output), "docx bytes");
    assert!(!h.path("src.docx").exists());

    let runs = h.runner.runs().await;
    assert_eq!(runs.len(), 1);
    assert!(runs[0].args.contains(&"--infilter=writer_pdf_import".to_string()));
}

#[tokio::test]
async fn test_office_replaces_existing_output() {
    let h = TestHarness::new();
    h.stub_soffice("fresh").await;
    let input = h.write("report.odt", "odt");
    let output = h.write("final.rtf", "stale");

    assert!(h.converter.convert(&input, &output).await);
    assert_eq!(read(&output), "fresh");
    assert!(!h.path("report.rtf").exists());
}

#[tokio::test]
async fn test_media_tools_receive_plain_arguments() {
    let h = TestHarness::new();
    let input = h.path("My Photo.png");
    let output = h.path("My Photo.webp");

    assert!(h.converter.convert(&input, &output).await);
    let runs = h.runner.runs().await;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].tool(), "magick");
    assert_eq!(
        runs[0].args,
        vec![
            "convert".to_string(),
            input.to_string_lossy().to_string(),
            output.to_string_lossy().to_string(),
        ]
    );
}

#[tokio::test]
async fn test_same_format_is_forwarded_to_tool() {
    let h = TestHarness::new();

    assert!(h.converter.convert("/v/a.mp4", "/v/b.mp4").await);
    let runs = h.runner.runs().await;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].tool(), "ffmpeg");
}

#[tokio::test]
async fn test_external_failure_reports_last_stderr_line() {
    let h = TestHarness::new();
    h.runner
        .on_run("ffmpeg", |_| {
            ToolOutput::failed(1, "ffmpeg version 6\nclip.wav: Invalid data found\n")
        })
        .await;

    let err = h
        .converter
        .try_convert("/m/clip.wav", "/m/clip.mp3")
        .await
        .unwrap_err();
    assert!(err.diagnostic().ends_with("clip.wav: Invalid data found"));
    match err {
        ConvertError::ExternalFailure {
            tool, exit_code, ..
        } => {
            assert_eq!(tool, Tool::Ffmpeg);
            assert_eq!(exit_code, Some(1));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_utf8_paths_reach_tool_unchanged() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let h = TestHarness::new();
    let input = h.dir.path().join(OsStr::from_bytes(b"caf\xe9.png"));
    let output = h.dir.path().join(OsStr::from_bytes(b"caf\xe9.webp"));

    assert!(h.converter.convert(&input, &output).await);
    let runs = h.runner.runs().await;
    assert_eq!(runs.len(), 1);
    assert_eq!(
        runs[0].raw_args,
        vec![
            OsString::from("convert"),
            input.into_os_string(),
            output.into_os_string(),
        ]
    );
}

#[tokio::test]
async fn test_empty_path_is_unknown_format() {
    let h = TestHarness::new();

    let err = h.converter.try_convert("", "b.txt").await.unwrap_err();
    assert!(matches!(err, ConvertError::UnknownFormat { .. }));
    assert!(h.runner.invocations().await.is_empty());
}
