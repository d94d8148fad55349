use std::sync::Once;

use crate::modules::{
    CaptureStatus, ControllerStatus, HoleRecord, HoleTableSink, PositionMm, Report, ReportSink, NO_PANORAMA,
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
/// Testing [HoleTableSink].table layout
#[test]
fn table() {
    init_once();
    init_each();
    let holes = [
        HoleRecord { id: 1, diameter_mm: 6.0, position_mm: PositionMm(32.0, 24.0) },
        HoleRecord { id: 12, diameter_mm: 10.456, position_mm: PositionMm(105.5, 7.3) },
    ];
    let target = concat!(
        "Hole Detection Report\n",
        "\n",
        "Hole ID   Diameter (mm)       Coordinates (x, y) in mm      \n",
        "1         6.00                (32.00, 24.00)                \n",
        "12        10.46               (105.50, 7.30)                \n",
    );
    assert_eq!(HoleTableSink::table(&holes), target);
}
///
/// Testing [HoleTableSink].finalize writes only when holes were found
#[test]
fn finalize() {
    init_once();
    init_each();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hole_info.txt");
    let mut sink = HoleTableSink::new(&path);
    sink.finalize(&Report::new(ControllerStatus::Connected, CaptureStatus::NotCapturing, &[], NO_PANORAMA)).unwrap();
    assert!(!path.exists());
    let holes = [HoleRecord { id: 1, diameter_mm: 6.0, position_mm: PositionMm(32.0, 24.0) }];
    sink.finalize(&Report::new(ControllerStatus::Connected, CaptureStatus::NotCapturing, &holes, NO_PANORAMA)).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Hole Detection Report\n\n"));
    assert_eq!(text.lines().count(), 4);
}
