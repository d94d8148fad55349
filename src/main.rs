use std::{io::BufRead, sync::atomic::Ordering};
use anyhow::Context;

use crate::modules::{
    CameraSource, CaptureConf, CaptureSource, DashboardSink, DirSource, FrameStore,
    HoleTableSink, ModbusController, PanoramaAssembler, Pipeline, PipelineConf, ReportSink,
};

mod modules;
///
/// Default configuration file, used when no path is given
const CONF_PATH: &str = "hole-inspection.yaml";
///
/// Application entry point
///
/// Runs a single inspection session, type `q` + Enter to stop capturing
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let dbg = "hole-inspection";
    let path = std::env::args().nth(1).unwrap_or_else(|| CONF_PATH.to_owned());
    let conf = PipelineConf::load(&path).with_context(|| format!("{dbg} | Loading config '{path}'"))?;
    log::info!("{dbg} | Config '{path}' loaded");
    let source: Box<dyn CaptureSource> = match &conf.capture {
        CaptureConf::Camera(camera) => Box::new(CameraSource::new(dbg, camera.clone())),
        CaptureConf::Directory(dir) => Box::new(DirSource::new(dir.clone())),
    };
    let controller = Box::new(ModbusController::new(dbg, conf.controller.clone()));
    let stitcher = Box::new(PanoramaAssembler::new(conf.panorama.clone()));
    let store = FrameStore::new(conf.store.clone()).context("Preparing frame store")?;
    let sinks: Vec<Box<dyn ReportSink>> = vec![
        Box::new(DashboardSink::new(conf.report.dashboard.clone())),
        Box::new(HoleTableSink::new(conf.report.hole_table.clone())),
    ];
    let mut pipeline = Pipeline::new(dbg, conf, source, controller, stitcher, store, sinks);
    let exit = pipeline.exit_handle();
    std::thread::Builder::new()
        .name("stdin".to_owned())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) if line.trim() == "q" => {
                        log::info!("{dbg}.stdin | Stop requested");
                        exit.store(true, Ordering::Release);
                        break;
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        })
        .context("Starting stdin listener")?;
    let report = pipeline.run();
    log::info!(
        "{dbg} | Controller: {:?}, holes: {}, panorama: {}",
        report.controller_status, report.total_holes, report.stitched_image_path,
    );
    Ok(())
}
