use std::{
    path::{Path, PathBuf},
    sync::{atomic::{AtomicBool, Ordering}, Arc},
    time::Instant,
};
use rayon::prelude::*;

use crate::modules::{
    CaptureError, CaptureSource, CaptureStatus, ControllerSession, ControllerStatus,
    Frame, FrameStore, HoleDetector, HoleRegistry, PipelineConf, PipelineState,
    Preprocessor, Report, ReportSink, SkippedFrame, Stitch, NO_PANORAMA,
};

///
/// File name of the stored panorama, without extension
pub const STITCHED_IMAGE: &str = "stitched_image";
///
/// File name of the stored panorama with the holes circled, without extension
pub const STITCHED_IMAGE_WITH_HOLES: &str = "stitched_image_with_holes";

///
/// # Inspection session coordinator
///
/// `Idle → Connecting → Capturing → Assembling → ReDetecting → Reporting → Idle`
///
/// - Connecting - controller and capture source are opened,
///   if either is unavailable the session goes straight to reporting
/// - Capturing - every frame is preprocessed, searched for holes and stored,
///   until exit requested, the source is exhausted or lost
/// - Assembling - stored frames are reloaded in parallel and stitched
/// - ReDetecting - holes are searched on the panorama against the same registry
/// - Reporting - final report handed to the sinks
///
/// Failures never stop the session, they degrade the report.
pub struct Pipeline {
    conf: PipelineConf,
    source: Box<dyn CaptureSource>,
    controller: Box<dyn ControllerSession>,
    stitcher: Box<dyn Stitch>,
    store: FrameStore,
    sinks: Vec<Box<dyn ReportSink>>,
    preprocessor: Preprocessor,
    detector: HoleDetector,
    registry: HoleRegistry,
    state: PipelineState,
    exit: Arc<AtomicBool>,
    dbg: String,
}
//
//
impl Pipeline {
    ///
    /// Returns [Pipeline] new instance
    pub fn new(
        parent: impl Into<String>,
        conf: PipelineConf,
        source: Box<dyn CaptureSource>,
        controller: Box<dyn ControllerSession>,
        stitcher: Box<dyn Stitch>,
        store: FrameStore,
        sinks: Vec<Box<dyn ReportSink>>,
    ) -> Self {
        let preprocessor = Preprocessor::new(&conf.preprocess);
        let detector = HoleDetector::new(conf.detector.clone(), conf.mm_per_pixel);
        let registry = HoleRegistry::new(conf.hole_distance_threshold);
        Self {
            conf,
            source,
            controller,
            stitcher,
            store,
            sinks,
            preprocessor,
            detector,
            registry,
            state: PipelineState::Idle,
            exit: Arc::new(AtomicBool::new(false)),
            dbg: format!("{}/Pipeline", parent.into()),
        }
    }
    ///
    /// Flag stopping the capture when set, shareable with other threads
    pub fn exit_handle(&self) -> Arc<AtomicBool> {
        self.exit.clone()
    }
    ///
    /// Requests the capture of the current, or the next, session to stop
    pub fn exit(&self) {
        self.exit.store(true, Ordering::Release);
    }
    ///
    /// Current stage
    pub fn state(&self) -> PipelineState {
        self.state
    }
    ///
    /// Holes confirmed in the last session
    pub fn registry(&self) -> &HoleRegistry {
        &self.registry
    }
    ///
    /// Runs a single inspection session, returns its final report
    pub fn run(&mut self) -> Report {
        let dbg = self.dbg.clone();
        let t = Instant::now();
        self.registry.clear();
        self.transition(PipelineState::Connecting);
        let controller_status = self.controller.connect();
        let stored = match controller_status {
            ControllerStatus::Connected => match self.source.open() {
                Ok(()) => {
                    self.transition(PipelineState::Capturing);
                    let stored = self.capture(controller_status);
                    self.source.close();
                    stored
                }
                Err(err) => {
                    log::warn!("{dbg}.run | Capture source unavailable: {}", err);
                    vec![]
                }
            },
            ControllerStatus::Unavailable => {
                log::warn!("{dbg}.run | Controller unavailable, capture skipped");
                vec![]
            }
        };
        // A stop request ends the current capture only, the next run captures again
        self.exit.store(false, Ordering::Release);
        let mut stitched_image_path = None;
        if stored.len() >= 2 {
            self.transition(PipelineState::Assembling);
            if let Some(panorama) = self.assemble(&stored) {
                self.transition(PipelineState::ReDetecting);
                stitched_image_path = self.redetect(&panorama);
            }
        } else {
            log::info!("{dbg}.run | {} frames stored, panorama skipped", stored.len());
        }
        self.transition(PipelineState::Reporting);
        let report = Report::new(
            controller_status,
            CaptureStatus::NotCapturing,
            self.registry.holes(),
            stitched_image_path.unwrap_or_else(|| NO_PANORAMA.to_owned()),
        );
        for sink in self.sinks.iter_mut() {
            if let Err(err) = sink.finalize(&report) {
                log::warn!("{dbg}.run | Report error: {}", err);
            }
        }
        let total = u16::try_from(report.total_holes).unwrap_or(u16::MAX);
        self.signal(self.conf.controller.holes_register, total);
        self.controller.disconnect();
        self.transition(PipelineState::Idle);
        log::info!("{dbg}.run | Total holes: {}, elapsed: {:?}", report.total_holes, t.elapsed());
        report
    }
    ///
    /// Capture loop, returns stored frames as `(index, path)`
    fn capture(&mut self, controller_status: ControllerStatus) -> Vec<(usize, PathBuf)> {
        let dbg = self.dbg.clone();
        self.signal(self.conf.controller.capture_register, 1);
        let mut stored = vec![];
        let mut index = 0;
        loop {
            if self.exit.load(Ordering::Acquire) {
                log::info!("{dbg}.capture | Exit requested");
                break;
            }
            if self.conf.max_frames.is_some_and(|max| index >= max) {
                log::info!("{dbg}.capture | Frame limit {index} reached");
                break;
            }
            let raw = match self.source.next_frame() {
                Ok(Some(mat)) => {
                    index += 1;
                    Frame::new(index, mat)
                }
                Ok(None) => {
                    log::info!("{dbg}.capture | Source exhausted");
                    break;
                }
                Err(CaptureError::AcquisitionTimeout) => {
                    log::warn!("{dbg}.capture | Acquisition timeout, retrying...");
                    continue;
                }
                Err(CaptureError::DeviceUnavailable(err)) => {
                    log::warn!("{dbg}.capture | Device unavailable: {}", err);
                    break;
                }
            };
            let frame = match self.preprocessor.process(&raw) {
                Ok(frame) => frame,
                Err(skip) => {
                    log::warn!("{dbg}.capture | Skipped: {}", skip);
                    continue;
                }
            };
            match self.detector.detect(&frame) {
                Ok(holes) => {
                    let new = self.registry.merge(&holes);
                    log::info!(
                        "{dbg}.capture | Frame {index}: {} holes, {} new, total {}",
                        holes.len(), new.len(), self.registry.len(),
                    );
                }
                Err(err) => log::warn!("{dbg}.capture | Frame {index}: {}", err),
            }
            let latest = match self.store.save(&raw) {
                Ok(path) => {
                    let latest = self.reference(&path);
                    stored.push((index, path));
                    latest
                }
                Err(err) => {
                    log::warn!("{dbg}.capture | Frame {index} not stored: {}", err);
                    NO_PANORAMA.to_owned()
                }
            };
            let live = Report::new(controller_status, CaptureStatus::Capturing, self.registry.holes(), latest);
            for sink in self.sinks.iter_mut() {
                if let Err(err) = sink.live(&live) {
                    log::warn!("{dbg}.capture | Live report error: {}", err);
                }
            }
        }
        self.signal(self.conf.controller.capture_register, 0);
        log::info!("{dbg}.capture | {} frames captured, {} stored", index, stored.len());
        stored
    }
    ///
    /// Reloads and preprocesses stored frames on the worker pool, stitches the usable ones
    fn assemble(&mut self, stored: &[(usize, PathBuf)]) -> Option<Frame> {
        let dbg = self.dbg.clone();
        let store = &self.store;
        let preprocessor = &self.preprocessor;
        let load = |(index, path): &(usize, PathBuf)| -> (usize, Result<Frame, SkippedFrame>) {
            let raw = store.load(*index, path);
            (*index, preprocessor.process(&raw))
        };
        let mut loaded: Vec<(usize, Result<Frame, SkippedFrame>)> = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.conf.workers.max(1))
            .build()
        {
            Ok(pool) => pool.install(|| stored.par_iter().map(&load).collect()),
            Err(err) => {
                log::warn!("{dbg}.assemble | Worker pool error: {}, loading sequentially", err);
                stored.iter().map(&load).collect()
            }
        };
        loaded.sort_by_key(|(index, _)| *index);
        let frames: Vec<Frame> = loaded
            .into_iter()
            .filter_map(|(_, frame)| match frame {
                Ok(frame) => Some(frame),
                Err(skip) => {
                    log::warn!("{dbg}.assemble | Skipped: {}", skip);
                    None
                }
            })
            .take(self.conf.max_stitch_frames)
            .collect();
        if frames.len() < 2 {
            log::warn!("{dbg}.assemble | Not enough valid images for stitching: {}", frames.len());
            return None;
        }
        log::info!("{dbg}.assemble | Stitching {} frames...", frames.len());
        match self.stitcher.stitch(&frames) {
            Ok(panorama) => Some(panorama),
            Err(err) => {
                log::warn!("{dbg}.assemble | Stitching failed: {}", err);
                None
            }
        }
    }
    ///
    /// Searches the panorama for holes missed on single frames,
    /// returns the panorama reference if it was stored
    fn redetect(&mut self, panorama: &Frame) -> Option<String> {
        let dbg = self.dbg.clone();
        let reference = match self.store.save_image(STITCHED_IMAGE, &panorama.mat) {
            Ok(path) => Some(self.reference(&path)),
            Err(err) => {
                log::warn!("{dbg}.redetect | Panorama not stored: {}", err);
                None
            }
        };
        match self.detector.detect(panorama) {
            Ok(holes) => {
                let new = self.registry.merge(&holes);
                log::info!("{dbg}.redetect | Panorama: {} holes, {} new, total {}", holes.len(), new.len(), self.registry.len());
                let annotated = self.detector.annotate(panorama, &holes)
                    .map_err(|err| err.to_string())
                    .and_then(|image| self.store.save_image(STITCHED_IMAGE_WITH_HOLES, &image).map_err(|err| err.to_string()));
                if let Err(err) = annotated {
                    log::warn!("{dbg}.redetect | Annotated panorama not stored: {}", err);
                }
            }
            Err(err) => log::warn!("{dbg}.redetect | Panorama: {}", err),
        }
        reference
    }
    ///
    /// Dashboard reference of a stored image
    fn reference(&self, path: &Path) -> String {
        let name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
        format!("{}{}", self.conf.report.images_prefix, name)
    }
    ///
    /// Writes the controller register if configured and connected
    fn signal(&mut self, register: Option<u16>, value: u16) {
        let Some(register) = register else { return };
        if self.controller.status() != ControllerStatus::Connected {
            return;
        }
        if let Err(err) = self.controller.write_register(register, value) {
            log::warn!("{}.signal | Register {register} = {value}: {}", self.dbg, err);
        }
    }
    fn transition(&mut self, state: PipelineState) {
        log::debug!("{}.transition | {:?} -> {:?}", self.dbg, self.state, state);
        self.state = state;
    }
}
//
//
impl std::fmt::Debug for Pipeline {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Pipeline")
            .field("dbg", &self.dbg)
            .field("state", &self.state)
            .field("holes", &self.registry.len())
            .finish()
    }
}
