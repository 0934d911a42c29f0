//! Integration tests for the in-memory document pipeline.

use pretty_assertions::assert_eq;
use stylelift_extract::css::Resolution;
use stylelift_extract::{Extraction, Outcome, PipelineStage, process_document};

fn extract(html: &str) -> Extraction {
    match process_document(html, "page.css") {
        Outcome::Rewritten(extraction) => extraction,
        Outcome::Unstyled { .. } => panic!("expected inline styles in {html}"),
    }
}

#[test]
fn test_full_document() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>T</title></head>
<body>
<div style="color:red;">a</div>
<div style="color:red;">b</div>
<p class="note" style="margin: 0; padding: 1px">c</p>
</body>
</html>
"#;
    let extraction = extract(html);

    assert_eq!(
        extraction.stylesheet,
        "/* Generated CSS from inline styles */\n\
         div#temp1 {\n    color:red;\n}\n\
         div#temp2 {\n    color:red;\n}\n\
         p.note {\n    margin: 0;\n    padding: 1px;\n}\n"
    );
    assert_eq!(
        extraction.document,
        r#"<!DOCTYPE html>
<html>
<head>
<link rel="stylesheet" href="page.css"/>
<title>T</title></head>
<body>
<div id="temp1">a</div>
<div id="temp2">b</div>
<p class="note">c</p>
</body>
</html>
"#
    );
    assert_eq!(extraction.rules, 3);
    assert_eq!(extraction.styled(), 3);
    assert_eq!(extraction.synthetic(), 2);
}

#[test]
fn test_unstyled_document_is_left_alone() {
    let outcome = process_document(r#"<p style="  ">x</p><div>y</div>"#, "page.css");
    assert_eq!(outcome, Outcome::Unstyled { issues: Vec::new() });
    assert_eq!(outcome.stage(), PipelineStage::StylesDetected);
}

#[test]
fn test_every_style_attribute_is_removed() {
    let html = r#"<html><body style="a:b"><div class="x" style="c:d"><span style="e:f"><i id="k" style="g:h"></i></span></div><div class="x" style="i:j"></div></body></html>"#;
    let extraction = extract(html);
    assert!(!extraction.document.contains("style="));
    assert_eq!(extraction.styled(), 5);
    assert_eq!(extraction.rules, 4);
    assert!(matches!(
        extraction.resolutions[4],
        Resolution::Collapsed { retracted: None, .. }
    ));
}

#[test]
fn test_headless_document_gets_a_head() {
    let extraction = extract(r#"<p style="color: blue">x</p>"#);
    assert_eq!(
        extraction.document,
        "<head>\n<link rel=\"stylesheet\" href=\"page.css\"/>\n</head><p id=\"temp1\">x</p>"
    );
}

#[test]
fn test_head_goes_after_doctype() {
    let extraction = extract(r#"<!DOCTYPE html><p style="a:b">x</p>"#);
    assert!(
        extraction
            .document
            .starts_with("<!DOCTYPE html><head>\n<link rel=\"stylesheet\" href=\"page.css\"/>\n</head>")
    );
}

#[test]
fn test_html_without_head() {
    let extraction = extract(r#"<html style="color: black"><body>x</body></html>"#);
    assert_eq!(
        extraction.document,
        "<html><head>\n<link rel=\"stylesheet\" href=\"page.css\"/>\n</head><body>x</body></html>"
    );
    assert_eq!(
        extraction.stylesheet,
        "/* Generated CSS from inline styles */\n:root {\n    color: black;\n}\n"
    );
}

#[test]
fn test_existing_link_is_not_duplicated() {
    let html = r#"<html><head><link rel="stylesheet" href="page.css"><title>T</title></head><body><b style="a:b">x</b></body></html>"#;
    let extraction = extract(html);
    assert_eq!(extraction.document.matches("href=\"page.css\"").count(), 1);
    assert!(
        extraction
            .document
            .contains("<head>\n<link rel=\"stylesheet\" href=\"page.css\"/>\n<title>T</title>")
    );
}

#[test]
fn test_rerun_continues_past_existing_synthetic_identities() {
    let first = extract(r#"<html><head></head><body><p style="a:b">x</p></body></html>"#);
    let edited = first
        .document
        .replace("<body>", r#"<body><p style="c:d">new</p>"#);
    let second = extract(&edited);

    assert!(second.document.contains(r#"<p id="temp2">new</p>"#));
    assert!(second.document.contains(r#"<p id="temp1">x</p>"#));
    assert_eq!(second.document.matches("<link").count(), 1);
}

#[test]
fn test_untouched_markup_round_trips() {
    let html = r#"<html><head><meta charset="utf-8"><script>if (a < b) { x = "</p>"; }</script></head><body><!-- note --><img src="a.png" alt='x'><br/><p style="a:b">&amp; text</p></body></html>"#;
    let extraction = extract(html);
    assert_eq!(
        extraction.document,
        r#"<html><head>
<link rel="stylesheet" href="page.css"/>
<meta charset="utf-8"><script>if (a < b) { x = "</p>"; }</script></head><body><!-- note --><img src="a.png" alt="x"><br/><p id="temp1">&amp; text</p></body></html>"#
    );
}

#[test]
fn test_same_input_same_output() {
    let html = r#"<div style="a:b"><span style="c:d"></span><span class="s" style="e:f"></span></div>"#;
    assert_eq!(extract(html), extract(html));
}

#[test]
fn test_deep_lenient_markup_on_a_small_stack() {
    let items = "<li>item".repeat(100_000);
    let html = format!(r#"<ul style="a:b">{items}"#);
    let extraction = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || extract(&html))
        .expect("spawn")
        .join()
        .expect("pipeline thread");

    let expected_tail = format!(r#"</head><ul id="temp1">{items}"#);
    assert!(extraction.document.ends_with(&expected_tail));
    assert_eq!(extraction.rules, 1);
}
