use std::sync::Once;
use opencv::prelude::*;

use crate::{
    modules::{Frame, FrameStore, FrameStoreConf},
    tests::synthetic,
};
///
///
static INIT: Once = Once::new();
///
/// once called initialisation
fn init_once() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    })
}
///
/// returns:
///  - ...
fn init_each() -> () {}
///
/// Testing [FrameStore].save / load
#[test]
fn save_and_load() {
    init_once();
    init_each();
    let dir = tempfile::tempdir().unwrap();
    let store = FrameStore::new(FrameStoreConf { dir: dir.path().join("frames"), format: "png".to_owned() }).unwrap();
    let frame = synthetic::frame_with_disks(7, 64, 48, &[(32, 24, 10)]);
    let path = store.save(&frame).unwrap();
    assert_eq!(path, dir.path().join("frames").join("frame_7.png"));
    assert!(path.is_file());
    let loaded = store.load(7, &path);
    assert_eq!(loaded.index, 7);
    assert_eq!((loaded.width(), loaded.height(), loaded.channels()), (64, 48, 3));
    let diff = opencv::core::norm2_def(&frame.mat, &loaded.mat).unwrap();
    assert_eq!(diff, 0.0);
}
///
/// Testing [FrameStore].load of a missing file
#[test]
fn load_missing() {
    init_once();
    init_each();
    let dir = tempfile::tempdir().unwrap();
    let store = FrameStore::new(FrameStoreConf { dir: dir.path().to_owned(), format: "png".to_owned() }).unwrap();
    let loaded = store.load(2, &dir.path().join("frame_2.png"));
    assert_eq!(loaded.index, 2);
    assert!(loaded.is_empty());
}
///
/// Testing [FrameStore].save_image
#[test]
fn save_named_image() {
    init_once();
    init_each();
    let dir = tempfile::tempdir().unwrap();
    let store = FrameStore::new(FrameStoreConf { dir: dir.path().to_owned(), format: "jpg".to_owned() }).unwrap();
    let path = store.save_image("stitched_image", &synthetic::blank(32, 32)).unwrap();
    assert_eq!(path.file_name().unwrap(), "stitched_image.jpg");
    assert!(path.is_file());
    assert!(!Frame::new(0, opencv::imgcodecs::imread_def(&path.to_string_lossy()).unwrap()).mat.empty());
}
