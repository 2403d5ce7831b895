use metatree::{decode, decode_with, DecodeError, DecoderConfig, DuplicatePolicy};

use crate::integration::support::{nested_image, put_u32, read_u32, ImageBuilder, NodeSpec};

#[test]
fn single_root_with_finder_comment() {
    let image = ImageBuilder::new(
        &["kMDItemFinderComment"],
        NodeSpec::new("").meta(0, "hello"),
    )
    .build();

    let store = decode(image).unwrap();

    assert_eq!(store.header.version(), (1, 0));
    assert_eq!(store.attributes.len(), 1);

    let root = &store.root;
    assert_eq!(root.name, "");
    assert_eq!(root.path, "");
    assert!(root.children.is_empty());
    assert_eq!(root.metadata.len(), 1);
    assert_eq!(root.metadata[0].attribute.as_ref(), "kMDItemFinderComment");
    assert_eq!(root.metadata[0].value, "hello");

    assert_eq!(store.index.len(), 1);
    let indexed = store.lookup("").unwrap();
    assert_eq!(indexed, root.metadata.as_slice());
}

#[test]
fn nested_paths_compose_with_separator() {
    let store = decode(nested_image()).unwrap();

    let a = &store.root.children[0];
    assert_eq!(a.name, "a");
    assert_eq!(a.path, "a/");

    let b = &a.children[0];
    assert_eq!(b.path, "a/b");
    assert!(b.is_leaf());

    assert_eq!(store.index.paths().collect::<Vec<_>>(), vec!["a/b"]);
    assert_eq!(store.lookup("a/b").unwrap()[0].value, "leaf");
    assert!(store.find("a/").is_some());
}

#[test]
fn root_path_never_gets_separator() {
    let image = ImageBuilder::new(
        &["k"],
        NodeSpec::new("")
            .meta(0, "root")
            .child(NodeSpec::new("x").meta(0, "child")),
    )
    .build();
    let store = decode(image).unwrap();
    assert_eq!(store.root.path, "");
    assert_eq!(store.root.children[0].path, "x");
    assert!(store.index.contains(""));
    assert!(store.index.contains("x"));
}

#[test]
fn children_keep_disk_order() {
    let image = ImageBuilder::new(
        &[],
        NodeSpec::new("")
            .child(NodeSpec::new("zeta"))
            .child(NodeSpec::new("alpha"))
            .child(NodeSpec::new("mu")),
    )
    .build();
    let store = decode(image).unwrap();
    let names: Vec<&str> = store
        .root
        .children
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mu"]);
}

#[test]
fn metadata_key_resolves_by_table_position() {
    let image = ImageBuilder::new(
        &["kMDItemFinderComment", "kMDItemWhereFroms", "kMDItemUserTags"],
        NodeSpec::new("").child(NodeSpec::new("f").meta(2, "Red").meta(0, "note")),
    )
    .build();
    let store = decode(image).unwrap();
    let f = &store.root.children[0];
    assert_eq!(f.metadata[0].attribute.as_ref(), "kMDItemUserTags");
    assert_eq!(f.metadata[1].attribute.as_ref(), "kMDItemFinderComment");
    assert_eq!(f.attribute("kMDItemUserTags"), Some("Red"));
}

#[test]
fn out_of_range_key_is_unknown_attribute() {
    let image = ImageBuilder::new(
        &["a", "b"],
        NodeSpec::new("").child(NodeSpec::new("f").meta(2, "x")),
    )
    .build();
    let err = decode(image).unwrap_err();
    match err {
        DecodeError::UnknownAttributeKey {
            key,
            table_len,
            path,
        } => {
            assert_eq!(key, 2);
            assert_eq!(table_len, 2);
            assert_eq!(path, "f");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_node_contributes_nothing_to_index() {
    let image = ImageBuilder::new(&["k"], NodeSpec::new("").child(NodeSpec::new("empty"))).build();
    let store = decode(image).unwrap();
    assert!(store.index.is_empty());
    assert_eq!(store.node_count(), 2);
    assert!(store.root.children[0].children.is_empty());
}

#[test]
fn header_opaque_fields_pass_through() {
    let mut builder = ImageBuilder::new(&[], NodeSpec::new(""));
    builder.rotated = 3;
    builder.random_tag = 0xfeed_f00d;
    builder.timestamp = -1.25;
    let store = decode(builder.build()).unwrap();
    assert_eq!(store.header.rotated, 3);
    assert_eq!(store.header.random_tag, 0xfeed_f00d);
    assert_eq!(store.header.timestamp, -1.25);
}

#[test]
fn newer_version_decodes_with_same_layout() {
    let mut builder = ImageBuilder::new(&["k"], NodeSpec::new("").meta(0, "v"));
    builder.major = 2;
    builder.minor = 7;
    let store = decode(builder.build()).unwrap();
    assert_eq!(store.header.version(), (2, 7));
    assert_eq!(store.lookup("").unwrap()[0].value, "v");
}

#[test]
fn zero_metadata_offset_is_read_like_any_other() {
    let mut image = ImageBuilder::new(&[], NodeSpec::new("")).build();
    let root = read_u32(&image, 16) as usize;
    // Offset 0 holds the magic, which reads as an enormous count
    put_u32(&mut image, root + 8, 0);
    let err = decode(image).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TruncatedRecord {
            record: "metadata block",
            ..
        }
    ));
}

#[test]
fn duplicate_sibling_names_are_rejected_by_default() {
    let image = ImageBuilder::new(
        &["k"],
        NodeSpec::new("")
            .child(NodeSpec::new("dup").meta(0, "first"))
            .child(NodeSpec::new("dup").meta(0, "second")),
    )
    .build();
    let err = decode(image).unwrap_err();
    assert!(matches!(err, DecodeError::DuplicatePath { ref path } if path == "dup"));
}

#[test]
fn duplicate_paths_can_be_downgraded_to_warning() {
    let image = ImageBuilder::new(
        &["k"],
        NodeSpec::new("")
            .child(NodeSpec::new("dup").meta(0, "first"))
            .child(NodeSpec::new("dup").meta(0, "second")),
    )
    .build();
    let config = DecoderConfig {
        duplicate_paths: DuplicatePolicy::Warn,
        ..DecoderConfig::default()
    };
    let store = decode_with(image, &config).unwrap();
    assert_eq!(store.root.children.len(), 2);
    assert_eq!(store.lookup("dup").unwrap()[0].value, "first");
}

#[test]
fn empty_child_name_collides_with_root() {
    let image = ImageBuilder::new(&[], NodeSpec::new("").child(NodeSpec::new(""))).build();
    assert!(matches!(
        decode(image),
        Err(DecodeError::DuplicatePath { .. })
    ));
}

#[test]
fn depth_limit_applies_to_honest_trees() {
    let mut node = NodeSpec::new("leaf");
    for i in 0..6 {
        node = NodeSpec::new(&format!("d{}", i)).child(node);
    }
    let image = ImageBuilder::new(&[], NodeSpec::new("").child(node)).build();

    let tight = DecoderConfig {
        max_depth: 3,
        ..DecoderConfig::default()
    };
    assert!(matches!(
        decode_with(image.clone(), &tight),
        Err(DecodeError::DepthExceeded { max_depth: 3, .. })
    ));

    let store = decode(image).unwrap();
    assert_eq!(store.node_count(), 8);
}

#[test]
fn looping_children_with_long_name_fail_on_path_length() {
    let name = "x".repeat(2000);
    let mut image = ImageBuilder::new(
        &[],
        NodeSpec::new("").child(NodeSpec::new(&name).child(NodeSpec::new("leaf"))),
    )
    .build();
    let root = read_u32(&image, 16) as usize;
    let root_children = read_u32(&image, root + 4);
    // point the long-named child back at the block that lists it
    put_u32(&mut image, root_children as usize + 4 + 4, root_children);
    assert!(image.len() < 3000);

    let err = decode(image).unwrap_err();
    match err {
        DecodeError::PathTooLong {
            max_path_len, len, ..
        } => {
            assert_eq!(max_path_len, 4096);
            assert_eq!(len, 6002);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn path_length_limit_is_configurable() {
    let mut node = NodeSpec::new("leaf");
    for i in 0..4 {
        node = NodeSpec::new(&format!("dir{}", i)).child(node);
    }
    let image = ImageBuilder::new(&[], NodeSpec::new("").child(node)).build();

    let tight = DecoderConfig {
        max_path_len: 12,
        ..DecoderConfig::default()
    };
    assert!(matches!(
        decode_with(image.clone(), &tight),
        Err(DecodeError::PathTooLong { max_path_len: 12, .. })
    ));
    assert_eq!(decode(image).unwrap().node_count(), 6);
}

#[test]
fn names_with_invalid_utf8_are_replaced() {
    let mut image = ImageBuilder::new(&[], NodeSpec::new("").child(NodeSpec::new("ab"))).build();
    let len = image.len();
    // pool ends "...\0ab\0"
    image[len - 3] = 0xff;
    let store = decode(image).unwrap();
    assert_eq!(store.root.children[0].name, "\u{fffd}b");
}
