//! Stateful adapter over an external barcode-decoding capability.
//!
//! The decoding itself is not reimplemented here: a [`DecodeBackend`] supplies
//! device enumeration and per-frame decoding, and [`CameraSession`] wraps it
//! with the lifecycle guarantees the client needs: one open handle at a time,
//! at most one detection per scanning period, and release on every exit path.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::CameraError;

/// An available video input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub id: String,
    pub label: String,
}

/// Tuning for the continuous decode loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Target frames tested per second.
    pub fps: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions { fps: 10 }
    }
}

impl DecodeOptions {
    fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

/// Outcome of testing a single video frame. Frames without a decodable code
/// are the common case and are never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    NoCode,
    Code(String),
}

/// A held device producing frames. Implementations release the underlying
/// device when the handle is dropped.
pub trait DeviceHandle {
    async fn decode_frame(&mut self) -> Result<Frame, CameraError>;
}

/// The external decoding library's surface: enumerate devices, open one.
pub trait DecodeBackend {
    type Handle: DeviceHandle;

    async fn enumerate(&self) -> Result<Vec<CameraDevice>, CameraError>;

    async fn open(
        &self,
        device_id: &str,
        options: DecodeOptions,
    ) -> Result<Self::Handle, CameraError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Ready,
    Scanning,
    Stopped,
    Errored,
    Closed,
}

/// Owns at most one open device handle and drives the decode loop.
///
/// Lifecycle: [`enumerate_devices`](CameraSession::enumerate_devices) →
/// [`start`](CameraSession::start) → [`wait_for_detection`](CameraSession::wait_for_detection);
/// detection, [`stop`](CameraSession::stop) and [`close`](CameraSession::close)
/// all release the handle through the same path, so release is idempotent.
pub struct CameraSession<B: DecodeBackend> {
    backend: B,
    options: DecodeOptions,
    devices: Vec<CameraDevice>,
    selected: Option<String>,
    handle: Option<B::Handle>,
    state: SessionState,
}

impl<B: DecodeBackend> CameraSession<B> {
    pub fn new(backend: B, options: DecodeOptions) -> Self {
        CameraSession {
            backend,
            options,
            devices: Vec::new(),
            selected: None,
            handle: None,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn devices(&self) -> &[CameraDevice] {
        &self.devices
    }

    /// The device `start` would use when called through `start_default`.
    pub fn selected_device(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Query available devices and pick a default, preferring a rear-facing
    /// camera by label. Empty enumeration is an error, as is denied access;
    /// the two are surfaced as distinct variants.
    pub async fn enumerate_devices(&mut self) -> Result<&[CameraDevice], CameraError> {
        if self.state == SessionState::Closed {
            return Err(CameraError::SessionClosed);
        }
        if self.state == SessionState::Errored {
            return Err(CameraError::CloseRequired);
        }
        let devices = match self.backend.enumerate().await {
            Ok(devices) => devices,
            Err(err) => {
                warn!("device enumeration failed: {err}");
                self.state = SessionState::Errored;
                return Err(err);
            }
        };
        if devices.is_empty() {
            self.state = SessionState::Errored;
            return Err(CameraError::NoDevices);
        }
        let default = devices
            .iter()
            .find(|d| {
                let label = d.label.to_lowercase();
                label.contains("back") || label.contains("rear")
            })
            .unwrap_or(&devices[0]);
        debug!(
            "enumerated {} device(s), default {}",
            devices.len(),
            default.id
        );
        self.selected = Some(default.id.clone());
        self.devices = devices;
        self.state = SessionState::Ready;
        Ok(&self.devices)
    }

    /// Acquire a device handle. Calling this while a handle is held is a
    /// programming error and fails fast instead of opening a second handle.
    /// A session that hit a fatal error stays dead: it must be closed and a
    /// fresh session opened, never restarted in place.
    pub async fn start(&mut self, device_id: &str) -> Result<(), CameraError> {
        if self.state == SessionState::Closed {
            return Err(CameraError::SessionClosed);
        }
        if self.state == SessionState::Errored {
            return Err(CameraError::CloseRequired);
        }
        if self.handle.is_some() {
            return Err(CameraError::AlreadyScanning);
        }
        let handle = match self.backend.open(device_id, self.options).await {
            Ok(handle) => handle,
            Err(err) => {
                warn!("failed to start device {device_id}: {err}");
                self.state = SessionState::Errored;
                return Err(err);
            }
        };
        info!("camera started on device {device_id}");
        self.selected = Some(device_id.to_string());
        self.handle = Some(handle);
        self.state = SessionState::Scanning;
        Ok(())
    }

    /// `start` on the default device picked during enumeration.
    pub async fn start_default(&mut self) -> Result<(), CameraError> {
        let device_id = self
            .selected
            .clone()
            .ok_or(CameraError::NoDevices)?;
        self.start(&device_id).await
    }

    /// Drive the decode loop until the first decodable code. Frames without
    /// a code are swallowed and the loop keeps its target rate; the first
    /// detection stops the loop and releases the handle before returning, so
    /// a session delivers at most one detection per scanning period. Fatal
    /// frame errors also release the handle and surface to the caller.
    pub async fn wait_for_detection(&mut self) -> Result<String, CameraError> {
        if self.state != SessionState::Scanning {
            return Err(CameraError::NotScanning);
        }
        let interval = self.options.frame_interval();
        loop {
            let frame = match self.handle.as_mut() {
                Some(handle) => handle.decode_frame().await,
                None => return Err(CameraError::NotScanning),
            };
            match frame {
                Ok(Frame::Code(code)) => {
                    info!("barcode detected: {code}");
                    self.stop();
                    return Ok(code);
                }
                Ok(Frame::NoCode) => {
                    tokio::time::sleep(interval).await;
                }
                Err(err) => {
                    warn!("fatal decode failure: {err}");
                    self.stop();
                    self.state = SessionState::Errored;
                    return Err(err);
                }
            }
        }
    }

    /// Release the handle if one is held. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            drop(handle);
            debug!("camera handle released");
        }
        if self.state == SessionState::Scanning {
            self.state = SessionState::Stopped;
        }
    }

    /// `stop` followed by `start` on another device.
    pub async fn switch_device(&mut self, next_id: &str) -> Result<(), CameraError> {
        self.stop();
        self.start(next_id).await
    }

    /// Terminal: release the handle and mark the session done. Every exit
    /// path (detection, explicit cancel, teardown) routes through here, and
    /// repeated calls are no-ops.
    pub fn close(&mut self) {
        self.stop();
        if self.state != SessionState::Closed {
            info!("camera session closed");
        }
        self.state = SessionState::Closed;
    }
}

/// Frame-queue backend standing in for a real decoding library. Used by the
/// terminal client's simulated scan and by tests.
pub mod sim {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, MutexGuard};

    use super::{CameraDevice, DecodeBackend, DecodeOptions, DeviceHandle, Frame};
    use crate::errors::CameraError;

    #[derive(Default)]
    struct SimInner {
        devices: Vec<CameraDevice>,
        frames: VecDeque<Result<Frame, CameraError>>,
        deny_access: bool,
        open_handles: usize,
    }

    #[derive(Clone, Default)]
    pub struct SimulatedBackend {
        inner: Arc<Mutex<SimInner>>,
    }

    impl SimulatedBackend {
        pub fn new(devices: Vec<CameraDevice>) -> Self {
            let backend = SimulatedBackend::default();
            backend.lock().devices = devices;
            backend
        }

        /// A single default device, as on most phones.
        pub fn single_device(id: &str, label: &str) -> Self {
            SimulatedBackend::new(vec![CameraDevice {
                id: id.to_string(),
                label: label.to_string(),
            }])
        }

        pub fn deny_access(&self) {
            self.lock().deny_access = true;
        }

        pub fn push_frame(&self, frame: Frame) {
            self.lock().frames.push_back(Ok(frame));
        }

        pub fn push_fatal(&self, err: CameraError) {
            self.lock().frames.push_back(Err(err));
        }

        /// Currently open handles; never exceeds one under a session.
        pub fn open_handles(&self) -> usize {
            self.lock().open_handles
        }

        fn lock(&self) -> MutexGuard<'_, SimInner> {
            // Single-threaded use; a poisoned lock means a prior test panic.
            match self.inner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            }
        }
    }

    impl DecodeBackend for SimulatedBackend {
        type Handle = SimulatedHandle;

        async fn enumerate(&self) -> Result<Vec<CameraDevice>, CameraError> {
            let inner = self.lock();
            if inner.deny_access {
                return Err(CameraError::PermissionDenied(
                    "simulated permission denial".to_string(),
                ));
            }
            Ok(inner.devices.clone())
        }

        async fn open(
            &self,
            device_id: &str,
            _options: DecodeOptions,
        ) -> Result<Self::Handle, CameraError> {
            let mut inner = self.lock();
            if !inner.devices.iter().any(|d| d.id == device_id) {
                return Err(CameraError::StartFailure(format!(
                    "unknown device {device_id}"
                )));
            }
            inner.open_handles += 1;
            Ok(SimulatedHandle {
                backend: self.clone(),
            })
        }
    }

    pub struct SimulatedHandle {
        backend: SimulatedBackend,
    }

    impl DeviceHandle for SimulatedHandle {
        async fn decode_frame(&mut self) -> Result<Frame, CameraError> {
            self.backend
                .lock()
                .frames
                .pop_front()
                .unwrap_or(Ok(Frame::NoCode))
        }
    }

    impl Drop for SimulatedHandle {
        fn drop(&mut self) {
            let mut inner = self.backend.lock();
            inner.open_handles = inner.open_handles.saturating_sub(1);
        }
    }
}
