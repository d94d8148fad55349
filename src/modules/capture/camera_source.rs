use std::{
    sync::{atomic::{AtomicBool, Ordering}, Arc},
    thread::JoinHandle,
    time::Duration,
};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};

use crate::modules::{CameraConf, CaptureError, CaptureSource};

///
/// # Live camera
///
/// Frames are grabbed on a dedicated thread and handed over
/// through a bounded channel, the grab thread blocks while the channel is full.
pub struct CameraSource {
    conf: CameraConf,
    stream: Option<kanal::Receiver<Mat>>,
    handle: Option<JoinHandle<()>>,
    exit: Arc<AtomicBool>,
    dbg: String,
}
//
//
impl CameraSource {
    ///
    /// Returns [CameraSource] new instance, the device is opened in [CaptureSource::open]
    pub fn new(parent: impl Into<String>, conf: CameraConf) -> Self {
        Self {
            conf,
            stream: None,
            handle: None,
            exit: Arc::new(AtomicBool::new(false)),
            dbg: format!("{}/CameraSource", parent.into()),
        }
    }
    ///
    /// Grab loop, runs until exit requested, the device fails, or the receiver is dropped
    fn grab(dbg: &str, mut camera: VideoCapture, send: kanal::Sender<Mat>, exit: Arc<AtomicBool>) {
        log::debug!("{dbg}.grab | Started");
        while !exit.load(Ordering::Acquire) {
            let mut frame = Mat::default();
            match camera.read(&mut frame) {
                Ok(true) => {
                    if let Err(err) = send.send(frame) {
                        log::debug!("{dbg}.grab | Receiver dropped: {:?}", err);
                        break;
                    }
                }
                Ok(false) => {
                    log::warn!("{dbg}.grab | Camera returned no frame");
                    break;
                }
                Err(err) => {
                    log::warn!("{dbg}.grab | Camera error: {}", err);
                    break;
                }
            }
        }
        if let Err(err) = camera.release() {
            log::warn!("{dbg}.grab | Release error: {}", err);
        }
        log::debug!("{dbg}.grab | Exit");
    }
}
//
//
impl CaptureSource for CameraSource {
    fn open(&mut self) -> Result<(), CaptureError> {
        let dbg = self.dbg.clone();
        let index = self.conf.index;
        let timeout = Duration::from_millis(self.conf.timeout_ms);
        let (send, recv) = kanal::bounded(self.conf.buffer.max(1));
        let (ready_send, ready_recv) = kanal::bounded::<Result<(), String>>(1);
        let exit = self.exit.clone();
        exit.store(false, Ordering::Release);
        log::debug!("{dbg}.open | Opening camera {index}...");
        let handle = std::thread::Builder::new()
            .name(dbg.clone())
            .spawn(move || {
                let camera = VideoCapture::new(index, videoio::CAP_ANY)
                    .and_then(|camera| camera.is_opened().map(|opened| (camera, opened)));
                match camera {
                    Ok((camera, true)) => {
                        let _ = ready_send.send(Ok(()));
                        Self::grab(&dbg, camera, send, exit);
                    }
                    Ok((_, false)) => {
                        let _ = ready_send.send(Err(format!("camera {index} can't be opened")));
                    }
                    Err(err) => {
                        let _ = ready_send.send(Err(err.to_string()));
                    }
                }
            })
            .map_err(|err| CaptureError::DeviceUnavailable(err.to_string()))?;
        self.handle = Some(handle);
        match ready_recv.recv_timeout(timeout) {
            Ok(Ok(())) => {
                log::info!("{}.open | Camera {index} opened", self.dbg);
                self.stream = Some(recv);
                Ok(())
            }
            Ok(Err(err)) => {
                self.close();
                Err(CaptureError::DeviceUnavailable(err))
            }
            Err(err) => {
                self.close();
                Err(CaptureError::DeviceUnavailable(format!("camera {index} not ready: {:?}", err)))
            }
        }
    }
    //
    //
    fn next_frame(&mut self) -> Result<Option<Mat>, CaptureError> {
        let Some(stream) = &self.stream else {
            return Err(CaptureError::DeviceUnavailable("camera is not opened".to_owned()));
        };
        match stream.recv_timeout(Duration::from_millis(self.conf.timeout_ms)) {
            Ok(frame) => Ok(Some(frame)),
            Err(kanal::ReceiveErrorTimeout::Timeout) => Err(CaptureError::AcquisitionTimeout),
            Err(err) => Err(CaptureError::DeviceUnavailable(format!("grab thread stopped: {:?}", err))),
        }
    }
    //
    //
    fn close(&mut self) {
        self.exit.store(true, Ordering::Release);
        self.stream.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("{}.close | Grab thread panicked", self.dbg);
            }
        }
    }
}
//
//
impl Drop for CameraSource {
    fn drop(&mut self) {
        self.close();
    }
}
