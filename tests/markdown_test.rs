//! Integration tests for the Markdown renderer.

use canondoc::render::{render_markdown, to_markdown, RenderOptions};
use canondoc::Document;
use serde_json::{json, Value};

fn doc(value: Value) -> Document {
    serde_json::from_value(value).expect("valid canonical document")
}

fn section(header: Option<&str>, blocks: Value) -> Document {
    let mut s = json!({ "sectionId": "s1", "contentBlocks": blocks });
    if let Some(h) = header {
        s["header"] = json!(h);
    }
    doc(json!({ "documentMetadata": { "title": "Test" }, "imageResources": [], "sections": [s] }))
}

fn para(id: &str, text: &str) -> Value {
    json!({ "blockId": id, "type": "PARAGRAPH", "text": text, "children": [] })
}

fn item(id: &str, text: &str) -> Value {
    json!({ "blockId": id, "type": "LI", "children": [para(&format!("{}-p", id), text)] })
}

#[test]
fn test_header_and_paragraph() {
    let d = section(Some("Section One"), json!([para("b1", "This is a simple paragraph.")]));
    assert_eq!(
        render_markdown(&d),
        "# Section One\n\nThis is a simple paragraph."
    );
}

#[test]
fn test_empty_documents() {
    assert_eq!(
        render_markdown(&doc(json!({ "documentMetadata": { "title": "Empty" }, "sections": [] }))),
        ""
    );
    assert_eq!(
        render_markdown(&doc(json!({ "documentMetadata": { "title": "Metadata only" } }))),
        ""
    );
}

#[test]
fn test_section_without_header() {
    let d = section(None, json!([para("b1", "No header here.")]));
    assert_eq!(render_markdown(&d), "No header here.");
}

#[test]
fn test_header_without_blocks() {
    let d = section(Some("Only Header Here"), json!([]));
    assert_eq!(render_markdown(&d), "# Only Header Here");
}

#[test]
fn test_multiple_paragraphs() {
    let d = section(
        Some("Section with Many Paragraphs"),
        json!([
            para("b1", "This is the first paragraph."),
            para("b2", "This is the second paragraph."),
            para("b3", "And this is a third one.")
        ]),
    );
    assert_eq!(
        render_markdown(&d),
        "# Section with Many Paragraphs\n\nThis is the first paragraph.\n\nThis is the second paragraph.\n\nAnd this is a third one."
    );
}

#[test]
fn test_multiple_sections() {
    let d = doc(json!({
        "sections": [
            { "sectionId": "s1", "header": "First Section Header",
              "contentBlocks": [para("b1", "Paragraph in first section.")] },
            { "sectionId": "s2", "header": "Second Section Header",
              "contentBlocks": [para("b2", "Paragraph in second section.")] }
        ]
    }));
    assert_eq!(
        render_markdown(&d),
        "# First Section Header\n\nParagraph in first section.\n\n# Second Section Header\n\nParagraph in second section."
    );
}

#[test]
fn test_header_levels() {
    let d = section(
        Some("Main Section Title"),
        json!([
            { "blockId": "b1", "type": "HEADER", "text": "Subheader Level 2", "level": 2 },
            para("b2", "Paragraph after H2 subheader."),
            { "blockId": "b3", "type": "HEADER", "text": "Subheader Level 3", "level": 3 },
            { "blockId": "b4", "type": "HEADER", "text": "No level" },
            { "blockId": "b5", "type": "HEADER", "text": "Negative", "level": -4 }
        ]),
    );
    assert_eq!(
        render_markdown(&d),
        "# Main Section Title\n\n## Subheader Level 2\n\nParagraph after H2 subheader.\n\n### Subheader Level 3\n\n# No level\n\n# Negative"
    );
}

#[test]
fn test_unordered_list() {
    let d = section(
        None,
        json!([{ "blockId": "ul1", "type": "UL", "children": [item("li1", "Item 1"), item("li2", "Item 2")] }]),
    );
    assert_eq!(render_markdown(&d), "- Item 1\n- Item 2");
}

#[test]
fn test_ordered_list() {
    let d = section(
        None,
        json!([{ "blockId": "ol1", "type": "ORDERED_LIST", "children": [
            item("li1", "First item"),
            item("li2", "Second item")
        ]}]),
    );
    assert_eq!(render_markdown(&d), "1. First item\n2. Second item");
}

#[test]
fn test_nested_list() {
    let d = section(
        None,
        json!([{ "blockId": "ul1", "type": "UL", "children": [
            { "blockId": "li1", "type": "LI", "children": [
                para("p1", "Outer item 1"),
                { "blockId": "ol1", "type": "OL", "children": [
                    item("li1.1", "Inner item A"),
                    item("li1.2", "Inner item B")
                ]}
            ]},
            item("li2", "Outer item 2")
        ]}]),
    );
    assert_eq!(
        render_markdown(&d),
        "- Outer item 1\n  1. Inner item A\n  2. Inner item B\n- Outer item 2"
    );
}

#[test]
fn test_deeply_nested_list_restarts_numbering() {
    let d = section(
        None,
        json!([{ "blockId": "ol", "type": "OL", "children": [
            item("a", "One"),
            { "blockId": "b", "type": "LI", "children": [
                para("bp", "Two"),
                { "blockId": "ol2", "type": "OL", "children": [
                    { "blockId": "c", "type": "LI", "children": [
                        para("cp", "Two.One"),
                        { "blockId": "ul3", "type": "UL", "children": [item("d", "Deep")] }
                    ]}
                ]}
            ]}
        ]}]),
    );
    assert_eq!(
        render_markdown(&d),
        "1. One\n2. Two\n  1. Two.One\n    - Deep"
    );
}

#[test]
fn test_image_with_caption() {
    let d = doc(json!({
        "imageResources": [{ "resourceId": "img1", "src": "http://example.com/image.png", "altText": "An example image" }],
        "sections": [{ "sectionId": "s1", "contentBlocks": [
            { "blockId": "imgRef1", "type": "IMAGE_REFERENCE", "resourceId": "img1", "caption": "This is a caption." }
        ]}]
    }));
    assert_eq!(
        render_markdown(&d),
        "![An example image](http://example.com/image.png)\n*This is a caption.*"
    );
}

#[test]
fn test_image_without_caption() {
    let d = doc(json!({
        "imageResources": [{ "id": "img1", "originalUrl": "http://example.com/image.png",
                             "resolvedUrl": "/images/image.png", "altText": "Alt text only" }],
        "sections": [{ "sectionId": "s1", "contentBlocks": [
            { "blockId": "imgRef1", "type": "IMAGE_REFERENCE", "resourceId": "img1" }
        ]}]
    }));
    assert_eq!(render_markdown(&d), "![Alt text only](/images/image.png)");
}

#[test]
fn test_unresolved_image() {
    let d = section(
        Some("Images"),
        json!([
            { "blockId": "i1", "type": "IMAGE_REFERENCE", "resourceId": "missing" },
            { "blockId": "i2", "type": "IMAGE_REFERENCE", "resourceId": "missing",
              "src": "fallback.jpg", "altText": "Missing Image" }
        ]),
    );
    assert_eq!(
        render_markdown(&d),
        "# Images\n\n![Missing Image](fallback.jpg)"
    );
}

#[test]
fn test_grouped_table() {
    let cell = |tag: &str, id: &str, text: &str| {
        json!({ "blockId": id, "type": tag, "children": [para(&format!("p_{}", id), text)] })
    };
    let d = section(
        None,
        json!([{ "blockId": "table1", "type": "TABLE", "children": [
            { "blockId": "thead1", "type": "THEAD", "children": [
                { "blockId": "tr_h", "type": "TR", "children": [
                    cell("TH", "th1", "Header 1"), cell("TH", "th2", "Header 2")
                ]}
            ]},
            { "blockId": "tbody1", "type": "TBODY", "children": [
                { "blockId": "tr_r1", "type": "TR", "children": [
                    cell("TD", "r1c1", "Row 1, Col 1"), cell("TD", "r1c2", "Row 1, Col 2")
                ]},
                { "blockId": "tr_r2", "type": "TR", "children": [
                    cell("TD", "r2c1", "Row 2, Col 1"), cell("TD", "r2c2", "Row 2, Col 2")
                ]}
            ]}
        ]}]),
    );
    assert_eq!(
        render_markdown(&d),
        "| Header 1 | Header 2 |\n|--------------|--------------|\n| Row 1, Col 1 | Row 1, Col 2 |\n| Row 2, Col 1 | Row 2, Col 2 |"
    );
}

#[test]
fn test_grid_table() {
    let d = section(
        None,
        json!([{ "blockId": "t", "type": "TABLE",
                 "headers": ["Header 1", "Header 2"], "rows": [["R1C1", "R1C2"]] }]),
    );
    let md = render_markdown(&d);
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "| Header 1 | Header 2 |");
    assert_eq!(lines[1].matches("--------------").count(), 2);
    assert_eq!(lines[2], "| R1C1 | R1C2 |");
}

#[test]
fn test_grid_table_without_headers() {
    let d = section(
        None,
        json!([{ "blockId": "t", "type": "TABLE", "rows": [["a", "b"], ["c", "d"]] }]),
    );
    assert_eq!(render_markdown(&d), "| a | b |\n| c | d |");
}

#[test]
fn test_special_characters_verbatim() {
    let d = section(
        Some("Section with *Special* Chars"),
        json!([
            para("p1", "This has _italic_ and **bold** and a [link](http://example.com)."),
            para("p2", "Some \\`code\\` and \\\\ and an asterisk * should appear as typed.")
        ]),
    );
    assert_eq!(
        render_markdown(&d),
        "# Section with *Special* Chars\n\nThis has _italic_ and **bold** and a [link](http://example.com).\n\nSome \\`code\\` and \\\\ and an asterisk * should appear as typed."
    );
}

#[test]
fn test_unknown_and_custom_blocks_dropped() {
    let d = section(
        None,
        json!([
            { "blockId": "x", "type": "FIGURE", "text": "ignored" },
            para("p", "Kept"),
            { "blockId": "c", "type": "CUSTOM", "customProperties": { "widget": "carousel" } }
        ]),
    );
    assert_eq!(render_markdown(&d), "Kept");
}

#[test]
fn test_empty_sections_skipped() {
    let d = doc(json!({
        "sections": [
            { "sectionId": "a" },
            { "sectionId": "b", "contentBlocks": [para("p", "Body")] },
            { "sectionId": "c", "header": "" }
        ]
    }));
    assert_eq!(render_markdown(&d), "Body");
}

#[test]
fn test_options_applied() {
    let d = section(
        Some("Head"),
        json!([{ "blockId": "ul", "type": "UL", "children": [item("li", "Point")] }]),
    );
    let options = RenderOptions::new().with_list_marker('*').with_frontmatter(true);
    assert_eq!(
        to_markdown(&d, &options),
        "---\ntitle: \"Test\"\n---\n\n# Head\n\n* Point"
    );
}
