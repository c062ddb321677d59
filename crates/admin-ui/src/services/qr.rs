//! QR check-in scanning
//!
//! The camera and the decoder are capabilities behind traits. A
//! [`QrScanSession`] owns whatever camera handle is live and guarantees it
//! is stopped when the scan ends: after the first decoded code, when the
//! modal closes, when acquisition fails, or when the session is dropped.
//! A stream that resolves after the session moved on is stopped on arrival.

use async_trait::async_trait;

use crate::models::{ConsoleError, ConsoleResult};

/// Something that can open a camera stream.
#[async_trait(?Send)]
pub trait CameraSource {
    async fn acquire(&self) -> ConsoleResult<Box<dyn CameraHandle>>;
}

/// A live camera stream.
pub trait CameraHandle {
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// Reads one frame from a live stream.
pub trait CodeReader {
    fn read(&mut self, handle: &dyn CameraHandle) -> DecodeAttempt;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeAttempt {
    Decoded(String),
    NotFound,
    Failed(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanPhase {
    #[default]
    Idle,
    Acquiring,
    Scanning,
    Decoded,
    Failed,
    Closed,
}

/// Identifies one acquisition; stale tickets are refused by [`QrScanSession::attach`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanTicket(u64);

#[derive(Default)]
pub struct QrScanSession {
    phase: ScanPhase,
    handle: Option<Box<dyn CameraHandle>>,
    generation: u64,
    code: Option<String>,
    error: Option<String>,
}

impl QrScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_scanning(&self) -> bool {
        self.phase == ScanPhase::Scanning
    }

    pub fn has_camera(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| handle.is_active())
    }

    /// Starts a new acquisition, releasing any stream from an earlier one.
    pub fn begin(&mut self) -> ScanTicket {
        self.release();
        self.generation += 1;
        self.phase = ScanPhase::Acquiring;
        self.code = None;
        self.error = None;
        ScanTicket(self.generation)
    }

    /// Hands the outcome of [`CameraSource::acquire`] to the session.
    pub fn attach(&mut self, ticket: ScanTicket, result: ConsoleResult<Box<dyn CameraHandle>>) -> ScanPhase {
        if ticket.0 != self.generation || self.phase != ScanPhase::Acquiring {
            if let Ok(mut handle) = result {
                tracing::debug!("camera stream arrived after the scan ended, stopping it");
                handle.stop();
            }
            return self.phase;
        }

        match result {
            Ok(handle) => {
                self.handle = Some(handle);
                self.phase = ScanPhase::Scanning;
            }
            Err(err) => {
                tracing::warn!("camera acquisition failed: {err}");
                self.error = Some(err.user_message());
                self.phase = ScanPhase::Failed;
            }
        }
        self.phase
    }

    /// Applies one decode attempt. Only the first decoded code counts.
    pub fn feed(&mut self, attempt: DecodeAttempt) -> Option<String> {
        if self.phase != ScanPhase::Scanning {
            return None;
        }
        match attempt {
            DecodeAttempt::Decoded(code) => self.finish(code),
            DecodeAttempt::NotFound => None,
            DecodeAttempt::Failed(reason) => {
                tracing::debug!("frame not decoded: {reason}");
                None
            }
        }
    }

    pub fn poll(&mut self, reader: &mut dyn CodeReader) -> Option<String> {
        let attempt = match (&self.handle, self.phase) {
            (Some(handle), ScanPhase::Scanning) => reader.read(handle.as_ref()),
            _ => return None,
        };
        self.feed(attempt)
    }

    /// Accepts a typed code as if it had been decoded.
    pub fn submit_manual(&mut self, code: &str) -> Option<String> {
        let code = code.trim();
        if code.is_empty() || matches!(self.phase, ScanPhase::Decoded | ScanPhase::Closed) {
            return None;
        }
        self.finish(code.to_owned())
    }

    /// Ends the session; a pending acquisition is refused when it resolves.
    pub fn close(&mut self) {
        self.release();
        self.generation += 1;
        self.phase = ScanPhase::Closed;
    }

    fn finish(&mut self, code: String) -> Option<String> {
        self.release();
        self.phase = ScanPhase::Decoded;
        self.code = Some(code.clone());
        Some(code)
    }

    fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
        }
    }
}

impl Drop for QrScanSession {
    fn drop(&mut self) {
        self.release();
    }
}

/// Reader used when no decoder is available; codes are typed instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDecoder;

impl CodeReader for NoDecoder {
    fn read(&mut self, _handle: &dyn CameraHandle) -> DecodeAttempt {
        DecodeAttempt::NotFound
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

    use super::*;

    /// Camera opened with `getUserMedia` and previewed in a `<video>` element.
    #[derive(Clone, Debug)]
    pub struct BrowserCamera {
        pub video_element_id: String,
    }

    impl BrowserCamera {
        pub fn new(video_element_id: impl Into<String>) -> Self {
            Self {
                video_element_id: video_element_id.into(),
            }
        }
    }

    fn js_message(value: JsValue) -> String {
        value.as_string().unwrap_or_else(|| format!("{value:?}"))
    }

    #[async_trait(?Send)]
    impl CameraSource for BrowserCamera {
        async fn acquire(&self) -> ConsoleResult<Box<dyn CameraHandle>> {
            let window = web_sys::window().ok_or_else(|| ConsoleError::camera("no window"))?;
            let devices = window
                .navigator()
                .media_devices()
                .map_err(|err| ConsoleError::camera(js_message(err)))?;

            let constraints = MediaStreamConstraints::new();
            constraints.set_video(&JsValue::TRUE);
            let promise = devices
                .get_user_media_with_constraints(&constraints)
                .map_err(|err| ConsoleError::camera(js_message(err)))?;
            let stream: MediaStream = JsFuture::from(promise)
                .await
                .map_err(|err| ConsoleError::camera(js_message(err)))?
                .dyn_into()
                .map_err(|_| ConsoleError::camera("unexpected media stream"))?;

            if let Some(video) = window
                .document()
                .and_then(|document| document.get_element_by_id(&self.video_element_id))
                .and_then(|element| element.dyn_into::<HtmlVideoElement>().ok())
            {
                video.set_src_object(Some(&stream));
            }

            Ok(Box::new(BrowserStream {
                stream,
                video_element_id: self.video_element_id.clone(),
                active: true,
            }))
        }
    }

    struct BrowserStream {
        stream: MediaStream,
        video_element_id: String,
        active: bool,
    }

    impl CameraHandle for BrowserStream {
        fn stop(&mut self) {
            if !self.active {
                return;
            }
            for track in self.stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                    track.stop();
                }
            }
            if let Some(video) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(&self.video_element_id))
                .and_then(|element| element.dyn_into::<HtmlVideoElement>().ok())
            {
                video.set_src_object(None);
            }
            self.active = false;
            web_sys::console::log_1(&"Camera released".into());
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserCamera;

/// Camera source for targets without media devices.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableCamera;

#[async_trait(?Send)]
impl CameraSource for UnavailableCamera {
    async fn acquire(&self) -> ConsoleResult<Box<dyn CameraHandle>> {
        Err(ConsoleError::camera("当前环境没有可用的摄像头"))
    }
}

/// The camera source for the current target.
pub fn default_camera(video_element_id: &str) -> std::rc::Rc<dyn CameraSource> {
    #[cfg(target_arch = "wasm32")]
    {
        std::rc::Rc::new(BrowserCamera::new(video_element_id))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = video_element_id;
        std::rc::Rc::new(UnavailableCamera)
    }
}
