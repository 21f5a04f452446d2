use super::*;

#[test]
fn test_new_name_returns_suggestion_when_free() {
    let mut names = NameAllocator::new();
    assert_eq!(names.new_name("source"), "source");
    assert!(names.is_allocated("source"));
}

#[test]
fn test_new_name_suffixes_until_unused() {
    let mut names = NameAllocator::new();
    assert_eq!(names.new_name("source"), "source");
    assert_eq!(names.new_name("source"), "source_");
    assert_eq!(names.new_name("source"), "source__");
}

#[test]
fn test_new_name_avoids_keywords() {
    let mut names = NameAllocator::new();
    assert_eq!(names.new_name("fun"), "fun_");
    assert_eq!(names.new_name("in"), "in_");
    assert!(!names.is_allocated("fun"), "keywords are never handed out");
}

#[test]
fn test_to_identifier_sanitizes() {
    assert_eq!(to_identifier("foo-bar"), "foo_bar");
    assert_eq!(to_identifier("1st"), "_1st");
    assert_eq!(to_identifier(""), "_");
    assert_eq!(to_identifier("already_ok"), "already_ok");
}

#[test]
fn test_tagged_names_are_looked_up() {
    let mut names = NameAllocator::new();
    names.new_name("source");
    let allocated = names
        .new_name_tagged("source", "captured")
        .expect("fresh tag should allocate");
    assert_eq!(allocated, "source_");
    assert_eq!(names.get("captured"), Some("source_"));
    assert_eq!(names.get("missing"), None);
}

#[test]
fn test_duplicate_tag_is_rejected() {
    let mut names = NameAllocator::new();
    names
        .new_name_tagged("a", "tag")
        .expect("first use of a tag should succeed");
    let err = names
        .new_name_tagged("b", "tag")
        .expect_err("second use of a tag should fail");
    assert_eq!(
        err,
        SynthesisError::DuplicateNameTag {
            tag: "tag".to_string()
        }
    );
    assert!(!names.is_allocated("b"), "a rejected tag must not reserve a name");
}

#[test]
fn test_is_keyword() {
    assert!(is_keyword("val"));
    assert!(is_keyword("typealias"));
    assert!(!is_keyword("value"));
    assert!(!is_keyword("data"), "soft keywords are valid identifiers");
}
