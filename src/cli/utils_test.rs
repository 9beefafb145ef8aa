use std::collections::HashMap;

use crate::cli::utils::*;
use crate::db::{Label, LabelColor};

#[test]
fn test_truncate_with_ellipsis_short_string() {
    let result = truncate_with_ellipsis("hello", 10);
    assert_eq!(result, "hello");
}

#[test]
fn test_truncate_with_ellipsis_exact_length() {
    let result = truncate_with_ellipsis("hello", 5);
    assert_eq!(result, "hello");
}

#[test]
fn test_truncate_with_ellipsis_long_string() {
    let result = truncate_with_ellipsis("hello world this is a long string", 10);
    assert_eq!(result, "hello w...");
}

#[test]
fn test_truncate_with_ellipsis_unicode() {
    let result = truncate_with_ellipsis("hello 世界", 8);
    assert_eq!(result, "hello 世界");

    let result2 = truncate_with_ellipsis("hello 世界", 7);
    assert_eq!(result2, "hell...");
}

#[test]
fn test_truncate_with_tiny_max_does_not_panic() {
    assert_eq!(truncate_with_ellipsis("hello", 2), "...");
}

#[test]
fn test_format_tags_empty() {
    let result = format_tags(&[]);
    assert_eq!(result, "-");
}

#[test]
fn test_format_tags_multiple() {
    let tags = vec!["tag1".to_string(), "tag2".to_string(), "tag3".to_string()];
    let result = format_tags(&tags);
    assert_eq!(result, "tag1, tag2, tag3");
}

#[test]
fn test_label_names_falls_back_to_id() {
    let mut labels = HashMap::new();
    labels.insert(
        "label-scan".to_string(),
        Label {
            id: "label-scan".to_string(),
            name: "Scan".to_string(),
            color: LabelColor::Cyan,
        },
    );

    let ids = vec!["label-scan".to_string(), "label-gone".to_string()];
    assert_eq!(label_names(&ids, &labels), vec!["Scan", "label-gone"]);
}

#[test]
fn test_or_dash() {
    assert_eq!(or_dash(""), "-");
    assert_eq!(or_dash("Daily"), "Daily");
}

#[test]
fn test_apply_table_style() {
    use tabled::builder::Builder;

    let mut builder = Builder::default();
    builder.push_record(["Name", "Value"]);
    builder.push_record(["Test", "123"]);

    let mut table = builder.build();
    apply_table_style(&mut table);

    let output = table.to_string();
    // Rounded style uses ╭─╮│╰─╯ characters
    assert!(output.contains("╭"), "Table should use rounded style");
}
