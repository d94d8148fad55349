use std::sync::Once;
use approx::assert_abs_diff_eq;
use opencv::{core::{Rect, VecN, Vec3b}, prelude::*};

use crate::{
    modules::{
        EdgesConf, Extraction, Frame, HoleDetector, HoleDetectorConf, HoleRegistry, PositionMm,
    },
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
/// Testing [HoleDetector].detect measures a single disk exactly
#[test]
fn single_disk_exact() {
    init_once();
    init_each();
    let detector = HoleDetector::new(synthetic::exact_detector_conf(), 0.1);
    let test_data = [
        // (cx, cy, r, diameter, x, y)
        (320, 240, 30, 6.0, 32.0, 24.0),
        (200, 150, 35, 7.0, 20.0, 15.0),
        (455, 333, 27, 5.4, 45.5, 33.3),
    ];
    for (cx, cy, r, diameter, x, y) in test_data {
        let frame = synthetic::frame_with_disks(1, 640, 480, &[(cx, cy, r)]);
        let holes = detector.detect(&frame).unwrap();
        assert_eq!(holes.len(), 1, "disk ({cx}, {cy}, {r})");
        assert_eq!(holes[0].diameter_mm, diameter);
        assert_eq!(holes[0].position_mm, PositionMm(x, y));
    }
}
///
/// Testing [HoleDetector].detect scales by mm per pixel
#[test]
fn scale() {
    init_once();
    init_each();
    let detector = HoleDetector::new(synthetic::exact_detector_conf(), 0.25);
    let frame = synthetic::frame_with_disks(1, 640, 480, &[(320, 240, 30)]);
    let holes = detector.detect(&frame).unwrap();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].diameter_mm, 15.0);
    assert_eq!(holes[0].position_mm, PositionMm(80.0, 60.0));
}
///
/// Testing [HoleDetector].detect never accepts 5 mm and smaller
#[test]
fn small_rejected() {
    init_once();
    init_each();
    let detector = HoleDetector::new(synthetic::exact_detector_conf(), 0.1);
    // r = 25 is exactly 5.00 mm, r = 4 is below the minimum area
    let frame = synthetic::frame_with_disks(1, 640, 480, &[(100, 100, 25), (300, 300, 4), (500, 200, 26)]);
    let holes = detector.detect(&frame).unwrap();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].diameter_mm, 5.2);
    assert!(holes.iter().all(|hole| hole.diameter_mm > 5.0));
}
///
/// Testing [HoleDetector].detect rejects elongated shapes
#[test]
fn bar_rejected() {
    init_once();
    init_each();
    let detector = HoleDetector::new(synthetic::exact_detector_conf(), 0.1);
    let mut mat = synthetic::blank(640, 480);
    synthetic::bar(&mut mat, 100, 100, 200, 10);
    synthetic::disk(&mut mat, 450, 300, 35);
    let holes = detector.detect(&Frame::new(1, mat)).unwrap();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].position_mm, PositionMm(45.0, 30.0));
}
///
/// Testing [HoleDetector].detect with several disks
#[test]
fn several_disks() {
    init_once();
    init_each();
    let detector = HoleDetector::new(synthetic::exact_detector_conf(), 0.1);
    let frame = synthetic::frame_with_disks(1, 640, 480, &[(100, 100, 30), (300, 100, 30), (500, 300, 30)]);
    let mut positions: Vec<(f64, f64)> = detector.detect(&frame).unwrap()
        .iter()
        .map(|hole| (hole.position_mm.0, hole.position_mm.1))
        .collect();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(positions, vec![(10.0, 10.0), (30.0, 10.0), (50.0, 30.0)]);
}
///
/// Testing [HoleDetector].detect on a single channel frame
#[test]
fn gray_frame() {
    init_once();
    init_each();
    let detector = HoleDetector::new(synthetic::exact_detector_conf(), 0.1);
    let mut mat = synthetic::blank_gray(640, 480);
    synthetic::disk(&mut mat, 320, 240, 30);
    let holes = detector.detect(&Frame::new(1, mat)).unwrap();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].diameter_mm, 6.0);
}
///
/// Testing [HoleDetector].detect with the default threshold extraction
#[test]
fn threshold_default() {
    init_once();
    init_each();
    let conf = HoleDetectorConf {
        extraction: Extraction::Threshold(Default::default()),
        ..HoleDetectorConf::default()
    };
    let detector = HoleDetector::new(conf, 0.1);
    let frame = synthetic::frame_with_disks(1, 640, 480, &[(320, 240, 30)]);
    let holes = detector.detect(&frame).unwrap();
    assert_eq!(holes.len(), 1);
    assert_abs_diff_eq!(holes[0].diameter_mm, 6.0, epsilon = 0.3);
    assert_abs_diff_eq!(holes[0].position_mm.0, 32.0, epsilon = 0.2);
    assert_abs_diff_eq!(holes[0].position_mm.1, 24.0, epsilon = 0.2);
}
///
/// Testing [HoleDetector].detect with the default edges extraction
#[test]
fn edges_default() {
    init_once();
    init_each();
    let detector = HoleDetector::new(HoleDetectorConf::default(), 0.1);
    let frame = synthetic::frame_with_disks(1, 1024, 768, &[(512, 384, 40)]);
    let holes = detector.detect(&frame).unwrap();
    assert_eq!(holes.len(), 1);
    assert_abs_diff_eq!(holes[0].diameter_mm, 8.0, epsilon = 0.5);
    assert_abs_diff_eq!(holes[0].position_mm.0, 51.2, epsilon = 0.3);
    assert_abs_diff_eq!(holes[0].position_mm.1, 38.4, epsilon = 0.3);
}
///
/// Testing [HoleDetector].detect ignores holes outside the region of interest
#[test]
fn edges_outside_roi() {
    init_once();
    init_each();
    let detector = HoleDetector::new(HoleDetectorConf::default(), 0.1);
    let frame = synthetic::frame_with_disks(1, 1024, 768, &[(55, 55, 30), (970, 710, 30)]);
    assert!(detector.detect(&frame).unwrap().is_empty());
    let conf = HoleDetectorConf {
        extraction: Extraction::Edges(EdgesConf { roi_inset: 400, ..EdgesConf::default() }),
        ..HoleDetectorConf::default()
    };
    let detector = HoleDetector::new(conf, 0.1);
    let frame = synthetic::frame_with_disks(1, 640, 480, &[(320, 240, 30)]);
    assert!(detector.detect(&frame).unwrap().is_empty());
}
///
/// Testing [HoleDetector].roi includes both corners
#[test]
fn roi_corners() {
    init_once();
    init_each();
    let test_data = [
        // (cols, rows, inset, target)
        (1024, 768, 100, Some(Rect::new(100, 100, 825, 569))),
        (640, 480, 0, Some(Rect::new(0, 0, 641, 481))),
        (200, 200, 100, Some(Rect::new(100, 100, 1, 1))),
        (200, 200, 101, None),
        (640, 480, 400, None),
    ];
    for (step, (cols, rows, inset, target)) in test_data.into_iter().enumerate() {
        let roi = HoleDetector::roi(cols, rows, inset);
        assert_eq!(roi, target, "step {step}");
        if let Some(roi) = roi {
            assert_eq!((roi.x + roi.width - 1, roi.y + roi.height - 1), (cols - inset, rows - inset), "step {step}");
        }
    }
}
///
/// Testing [HoleDetector].detect on a blank and an empty frame
#[test]
fn nothing_to_detect() {
    init_once();
    init_each();
    let detector = HoleDetector::new(synthetic::exact_detector_conf(), 0.1);
    assert!(detector.detect(&Frame::new(1, synthetic::blank(640, 480))).unwrap().is_empty());
    assert!(detector.detect(&Frame::new(2, opencv::core::Mat::default())).unwrap().is_empty());
}
///
/// Testing detection of an unchanged frame adds nothing to the registry
#[test]
fn redetection_idempotent() {
    init_once();
    init_each();
    let detector = HoleDetector::new(synthetic::exact_detector_conf(), 0.1);
    let frame = synthetic::frame_with_disks(1, 640, 480, &[(100, 100, 30), (300, 100, 30), (500, 300, 30)]);
    let mut registry = HoleRegistry::default();
    let first = registry.merge(&detector.detect(&frame).unwrap());
    assert_eq!(first.len(), 3);
    let second = registry.merge(&detector.detect(&frame).unwrap());
    assert!(second.is_empty());
    assert_eq!(registry.len(), 3);
}
///
/// Testing [HoleDetector].annotate circles the holes in green
#[test]
fn annotate() {
    init_once();
    init_each();
    let detector = HoleDetector::new(synthetic::exact_detector_conf(), 0.1);
    let frame = synthetic::frame_with_disks(1, 640, 480, &[(320, 240, 30)]);
    let holes = detector.detect(&frame).unwrap();
    let image = detector.annotate(&frame, &holes).unwrap();
    assert_eq!((image.cols(), image.rows(), image.channels()), (640, 480, 3));
    assert_eq!(*image.at_2d::<Vec3b>(240, 350).unwrap(), VecN([0, 255, 0]));
    assert_eq!(*image.at_2d::<Vec3b>(0, 0).unwrap(), VecN([255, 255, 255]));
    // source frame untouched
    assert_eq!(*frame.mat.at_2d::<Vec3b>(240, 350).unwrap(), VecN([0, 0, 0]));
}
