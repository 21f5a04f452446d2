use super::*;
use crate::flags::Flags;

#[test]
fn test_metadata_kind_from_raw() {
    assert_eq!(MetadataKind::from_raw(1), MetadataKind::Class);
    assert_eq!(MetadataKind::from_raw(2), MetadataKind::FileFacade);
    assert_eq!(MetadataKind::from_raw(3), MetadataKind::SyntheticClass);
    assert_eq!(MetadataKind::from_raw(4), MetadataKind::MultiFileClassFacade);
    assert_eq!(MetadataKind::from_raw(5), MetadataKind::MultiFileClassPart);
    assert_eq!(MetadataKind::from_raw(42), MetadataKind::Unknown(42));
}

#[test]
fn test_supported_version_gate() {
    assert!(KotlinClassHeader::new(1, &[1, 1, 13]).is_supported_version());
    assert!(KotlinClassHeader::new(1, &[2, 0]).is_supported_version());
    assert!(!KotlinClassHeader::new(1, &[1, 0, 3]).is_supported_version());
    assert!(!KotlinClassHeader::new(1, &[]).is_supported_version());
}

#[test]
fn test_version_string() {
    assert_eq!(KotlinClassHeader::new(1, &[1, 1, 13]).version_string(), "1.1.13");
}

#[test]
fn test_closure_is_a_reader() {
    let reader = |header: &KotlinClassHeader| match header.metadata_kind() {
        MetadataKind::Class => Ok(KotlinClassMetadata::Class(KmClass::new(
            Flags::IS_PUBLIC,
            "io/acme/Foo",
        ))),
        _ => Err(MetadataError::Corrupt("not a class".to_string())),
    };

    let class = reader
        .read(&KotlinClassHeader::new(1, &[1, 1]))
        .expect("class header reads");
    assert_eq!(class.kind(), MetadataKind::Class);
    assert_eq!(class.into_class().map(|c| c.name), Some("io/acme/Foo".to_string()));

    let err = reader
        .read(&KotlinClassHeader::new(2, &[1, 1]))
        .expect_err("file facade is rejected by this reader");
    assert_eq!(err, MetadataError::Corrupt("not a class".to_string()));
}

#[test]
fn test_header_deserializes_with_defaults() {
    let header: KotlinClassHeader =
        serde_json::from_str(r#"{ "kind": 1, "metadataVersion": [1, 1, 13] }"#)
            .expect("header parses");
    assert_eq!(header.metadata_kind(), MetadataKind::Class);
    assert!(header.data1.is_empty());
    assert_eq!(header.package_name, None);
}
