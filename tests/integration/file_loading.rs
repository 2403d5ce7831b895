use std::fs;

use metatree::{DecodeError, DecoderConfig, MetaStore};
use tempfile::TempDir;

use crate::integration::support::{nested_image, synthetic_tree, ImageBuilder, SYNTHETIC_ATTRIBUTES};

#[test]
fn open_reads_and_decodes_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.meta");
    fs::write(&path, nested_image()).unwrap();

    let store = MetaStore::open(&path, &DecoderConfig::default()).unwrap();
    assert_eq!(store.node_count(), 3);
    assert_eq!(store.lookup("a/b").unwrap()[0].value, "leaf");
}

#[test]
fn open_missing_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.meta");

    let err = MetaStore::open(&path, &DecoderConfig::default()).unwrap_err();
    match err {
        DecodeError::Io { path: reported, source } => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn open_async_matches_blocking_open() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wide.meta");
    let image = ImageBuilder::new(&SYNTHETIC_ATTRIBUTES, synthetic_tree(3, 4)).build();
    fs::write(&path, image).unwrap();

    let config = DecoderConfig::default();
    let blocking = MetaStore::open(&path, &config).unwrap();
    let awaited = MetaStore::open_async(&path, &config).await.unwrap();
    assert_eq!(blocking, awaited);
    assert_eq!(awaited.node_count(), 1 + 4 + 16 + 64);
}

#[tokio::test]
async fn open_async_surfaces_decode_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("foreign.bin");
    fs::write(&path, b"not a container at all").unwrap();

    let err = MetaStore::open_async(&path, &DecoderConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DecodeError::InvalidFormat { .. }));
}
