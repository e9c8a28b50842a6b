//! Custom Test Assertions
//!
//! Assertion helpers for TISS documents and validation outcomes that print
//! the offending document or error list on failure.

use domain_tiss::{ValidationOutcome, TISS_PREFIX};

/// Asserts that validation passed, printing every error otherwise
pub fn assert_validation_ok(outcome: &ValidationOutcome) {
    assert!(
        outcome.is_valid && outcome.errors.is_empty(),
        "Expected a valid document, got errors:\n{}",
        outcome.errors.join("\n")
    );
}

/// Asserts that validation failed with an error containing `needle`
pub fn assert_validation_fails_with(outcome: &ValidationOutcome, needle: &str) {
    assert!(!outcome.is_valid, "Expected validation to fail");
    assert!(
        outcome.errors.iter().any(|e| e.contains(needle)),
        "No error contains {:?}; errors were:\n{}",
        needle,
        outcome.errors.join("\n")
    );
}

/// Asserts that `xml` holds an `ans:<element>` with exactly `text` as content
pub fn assert_xml_contains(xml: &str, element: &str, text: &str) {
    let expected = format!("<{TISS_PREFIX}:{element}>{text}</{TISS_PREFIX}:{element}>");
    assert!(
        xml.contains(&expected),
        "Expected {} in document:\n{}",
        expected,
        xml
    );
}

/// Byte offset of the first `<ans:element` opening tag at or after `from`
///
/// The tag may carry attributes, so the name must be followed by `>`, `/`
/// or whitespace.
fn find_opening_tag(xml: &str, element: &str, from: usize) -> Option<usize> {
    let tag = format!("<{TISS_PREFIX}:{element}");
    let mut cursor = from;
    while let Some(offset) = xml[cursor..].find(&tag) {
        let start = cursor + offset;
        let after = xml[start + tag.len()..].chars().next();
        if matches!(after, Some(c) if c == '>' || c == '/' || c.is_whitespace()) {
            return Some(start);
        }
        cursor = start + tag.len();
    }
    None
}

/// Asserts that the opening tags of `elements` first appear in the given order
pub fn assert_element_order(xml: &str, elements: &[&str]) {
    let mut last = 0;
    for element in elements {
        last = find_opening_tag(xml, element, last).unwrap_or_else(|| {
            panic!(
                "Element <{}:{}> missing or out of order in:\n{}",
                TISS_PREFIX, element, xml
            )
        });
    }
}
