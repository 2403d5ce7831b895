use metatree::types::MAGIC;
use metatree::{decode, DecodeError};
use proptest::prelude::*;

use crate::integration::support::{ImageBuilder, NodeSpec, SYNTHETIC_ATTRIBUTES};

fn metadata_strategy() -> impl Strategy<Value = Vec<(u32, String)>> {
    prop::collection::vec(
        (0..SYNTHETIC_ATTRIBUTES.len() as u32, "[a-zA-Z0-9 ._-]{0,12}"),
        0..3,
    )
}

/// Trees whose sibling names are unique and non-empty, so every path is distinct
fn tree_strategy() -> impl Strategy<Value = NodeSpec> {
    let leaf = (metadata_strategy(), any::<u32>()).prop_map(|(metadata, last_changed)| NodeSpec {
        name: String::new(),
        last_changed,
        metadata,
        children: Vec::new(),
    });
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            metadata_strategy(),
            any::<u32>(),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4),
        )
            .prop_map(|(metadata, last_changed, children)| NodeSpec {
                name: String::new(),
                last_changed,
                metadata,
                children: children
                    .into_iter()
                    .map(|(name, mut child)| {
                        child.name = name;
                        child
                    })
                    .collect(),
            })
    })
}

fn image_strategy() -> impl Strategy<Value = Vec<u8>> {
    tree_strategy().prop_map(|root| ImageBuilder::new(&SYNTHETIC_ATTRIBUTES, root).build())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn decode_is_deterministic(image in image_strategy()) {
        let first = decode(image.clone()).unwrap();
        let second = decode(image).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn index_holds_exactly_the_nodes_with_metadata(image in image_strategy()) {
        let store = decode(image).unwrap();
        let mut with_metadata = 0;
        for node in store.root.walk() {
            prop_assert_eq!(store.index.contains(&node.path), !node.metadata.is_empty());
            if !node.metadata.is_empty() {
                with_metadata += 1;
                prop_assert_eq!(store.lookup(&node.path).unwrap(), node.metadata.as_slice());
            }
        }
        prop_assert_eq!(store.index.len(), with_metadata);
    }

    #[test]
    fn truncation_never_decodes(image in image_strategy(), cut in any::<prop::sample::Index>()) {
        let cut = cut.index(image.len());
        let err = decode(image[..cut].to_vec()).unwrap_err();
        prop_assert!(err.is_truncation(), "cut at {} gave {:?}", cut, err);
    }

    #[test]
    fn foreign_magic_is_always_invalid_format(
        magic in prop::array::uniform6(any::<u8>()),
        rest in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(&magic != MAGIC);
        let mut bytes = magic.to_vec();
        bytes.extend_from_slice(&rest);
        let is_invalid = matches!(decode(bytes), Err(DecodeError::InvalidFormat { .. }));
        prop_assert!(is_invalid);
    }

    #[test]
    fn every_child_path_extends_its_parent(image in image_strategy()) {
        let store = decode(image).unwrap();
        for node in store.root.walk() {
            for child in &node.children {
                prop_assert!(child.path.starts_with(&node.path));
                prop_assert!(child.path[node.path.len()..].starts_with(child.name.as_str()));
                prop_assert_eq!(child.path.ends_with('/'), !child.children.is_empty());
            }
        }
    }
}
