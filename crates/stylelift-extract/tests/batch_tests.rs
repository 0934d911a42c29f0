//! Integration tests for file output, discovery and batch runs.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use stylelift_extract::{
    ExtractError, PipelineStage, RunOptions, discover, process_file, run_batch, stylesheet_href,
    stylesheet_path,
};
use tempfile::TempDir;

const STYLED: &str = r#"<html><head></head><body><div style="color: red">x</div></body></html>"#;
const PLAIN: &str = "<html><head></head><body><div>x</div></body></html>";

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, contents).expect("write fixture");
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).expect("read output")
}

#[test]
fn test_stylesheet_names() {
    assert_eq!(
        stylesheet_path(Path::new("site/a.b.html")),
        Path::new("site/a.b.css")
    );
    assert_eq!(
        stylesheet_href(Path::new("site/Index.HTM")).expect("href"),
        "Index.css"
    );
    assert!(matches!(
        stylesheet_href(Path::new("/")),
        Err(ExtractError::NoFileName(_))
    ));
}

#[test]
fn test_process_file_writes_stylesheet_and_document() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "page.html", STYLED.as_bytes());

    let report = process_file(&dir.path().join("page.html"), false).expect("process");

    assert!(report.written);
    assert_eq!(report.stage, PipelineStage::Serialized);
    assert_eq!(report.stylesheet, Some(dir.path().join("page.css")));
    assert_eq!((report.styled, report.rules, report.synthetic), (1, 1, 1));
    assert_eq!(
        read(dir.path(), "page.css"),
        "/* Generated CSS from inline styles */\ndiv#temp1 {\n    color: red;\n}\n"
    );
    assert_eq!(
        read(dir.path(), "page.html"),
        "<html><head>\n<link rel=\"stylesheet\" href=\"page.css\"/>\n</head><body><div id=\"temp1\">x</div></body></html>"
    );
}

#[test]
fn test_unstyled_file_is_not_touched() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "plain.html", PLAIN.as_bytes());

    let report = process_file(&dir.path().join("plain.html"), false).expect("process");

    assert!(!report.written);
    assert_eq!(report.stylesheet, None);
    assert_eq!(report.stage, PipelineStage::StylesDetected);
    assert_eq!(read(dir.path(), "plain.html"), PLAIN);
    assert!(!dir.path().join("plain.css").exists());
}

#[test]
fn test_second_run_is_a_no_op() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "page.html", STYLED.as_bytes());
    let path = dir.path().join("page.html");

    let _ = process_file(&path, false).expect("first run");
    let rewritten = read(dir.path(), "page.html");
    let report = process_file(&path, false).expect("second run");

    assert!(!report.written);
    assert_eq!(read(dir.path(), "page.html"), rewritten);
}

#[test]
fn test_invalid_utf8_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "bad.html", b"<p style=\"a:b\">\xff\xfe</p>");

    let error = process_file(&dir.path().join("bad.html"), false).expect_err("invalid UTF-8");
    assert!(matches!(error, ExtractError::InvalidUtf8 { .. }));
    assert!(!dir.path().join("bad.css").exists());
}

#[test]
fn test_discover_finds_html_files_in_order() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "b.html", b"");
    write(dir.path(), "a/z.HTM", b"");
    write(dir.path(), ".hidden/c.html", b"");
    write(dir.path(), "ignored/d.htm", b"");
    write(dir.path(), ".gitignore", b"ignored/\n");
    write(dir.path(), "style.css", b"");
    write(dir.path(), "notes.txt", b"");

    let found: Vec<_> = discover(dir.path())
        .expect("discover")
        .into_iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(found, [".hidden/c.html", "a/z.HTM", "b.html", "ignored/d.htm"]);
}

#[test]
fn test_discover_rejects_missing_root() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("nope");
    assert!(matches!(
        discover(&missing),
        Err(ExtractError::NotADirectory(_))
    ));
}

#[test]
fn test_batch_isolates_failures() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "one.html", STYLED.as_bytes());
    write(dir.path(), "two/bad.html", b"\xc3\x28");
    write(dir.path(), "two/three.htm", STYLED.as_bytes());
    write(dir.path(), "plain.html", PLAIN.as_bytes());

    let options = RunOptions {
        dry_run: false,
        jobs: Some(2),
    };
    let report = run_batch(dir.path(), &options).expect("batch");

    assert!(report.has_failures());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, dir.path().join("two/bad.html"));
    assert_eq!(report.files.len(), 3);
    assert_eq!(report.rewritten().count(), 2);
    assert!(dir.path().join("one.css").exists());
    assert!(dir.path().join("two/three.css").exists());
    assert!(read(dir.path(), "two/three.htm").contains("href=\"three.css\""));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "page.html", STYLED.as_bytes());

    let options = RunOptions {
        dry_run: true,
        jobs: Some(1),
    };
    let report = run_batch(dir.path(), &options).expect("batch");

    assert!(report.dry_run);
    assert!(!report.has_failures());
    let file = &report.files[0];
    assert!(!file.written);
    assert_eq!(file.stylesheet, Some(dir.path().join("page.css")));
    assert_eq!(file.rules, 1);
    assert_eq!(read(dir.path(), "page.html"), STYLED);
    assert!(!dir.path().join("page.css").exists());
}

#[test]
fn test_batch_is_deterministic_across_job_counts() {
    let sequential = TempDir::new().expect("tempdir");
    let parallel = TempDir::new().expect("tempdir");
    for dir in [&sequential, &parallel] {
        for i in 0..8 {
            write(
                dir.path(),
                &format!("p{i}.html"),
                format!(r#"<p style="n:{i}"></p><p style="m:{i}"></p>"#).as_bytes(),
            );
        }
    }

    let _ = run_batch(sequential.path(), &RunOptions { dry_run: false, jobs: Some(1) })
        .expect("sequential");
    let _ = run_batch(parallel.path(), &RunOptions { dry_run: false, jobs: Some(4) })
        .expect("parallel");

    for i in 0..8 {
        for name in [format!("p{i}.html"), format!("p{i}.css")] {
            assert_eq!(read(sequential.path(), &name), read(parallel.path(), &name));
        }
    }
}

#[test]
fn test_shared_stylesheet_name_is_not_overwritten() {
    let dir = TempDir::new().expect("tempdir");
    let html = r#"<p style="color: red">x</p>"#;
    write(dir.path(), "page.htm", br#"<b style="margin: 0">y</b>"#);
    write(dir.path(), "page.html", html.as_bytes());

    let options = RunOptions {
        dry_run: false,
        jobs: Some(2),
    };
    let report = run_batch(dir.path(), &options).expect("batch");

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].path, dir.path().join("page.htm"));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, dir.path().join("page.html"));
    assert!(report.failures[0].error.contains("page.css"));

    assert_eq!(
        read(dir.path(), "page.css"),
        "/* Generated CSS from inline styles */\nb#temp1 {\n    margin: 0;\n}\n"
    );
    assert_eq!(read(dir.path(), "page.html"), html);
}
