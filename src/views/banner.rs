//! Banners de resultado
//!
//! Un único banner activo: éxito o error. El de éxito se descarta solo tras
//! `dismiss_after` mediante una tarea tokio que se aborta con cualquier
//! acción nueva, con `dismiss` o al soltar `Banners`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

#[derive(Default)]
struct BannerState {
    current: Option<Banner>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl BannerState {
    /// Sustituye el banner y cancela cualquier temporizador pendiente
    fn replace(&mut self, banner: Option<Banner>) -> u64 {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.generation += 1;
        self.current = banner;
        self.generation
    }
}

pub struct Banners {
    state: Arc<Mutex<BannerState>>,
    dismiss_after: Duration,
}

impl Banners {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(BannerState::default())),
            dismiss_after,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BannerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn success(&self, message: impl Into<String>) {
        let mut state = self.lock();
        let generation = state.replace(Some(Banner::Success(message.into())));

        match Handle::try_current() {
            Ok(handle) => {
                let weak = Arc::downgrade(&self.state);
                let delay = self.dismiss_after;
                state.timer = Some(handle.spawn(expire_later(weak, generation, delay)));
            }
            Err(_) => debug!("⏱️ Sin runtime tokio: el banner no se descartará solo"),
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.lock().replace(Some(Banner::Error(message.into())));
    }

    pub fn dismiss(&self) {
        self.lock().replace(None);
    }

    pub fn current(&self) -> Option<Banner> {
        self.lock().current.clone()
    }

    pub fn success_message(&self) -> Option<String> {
        match self.current() {
            Some(Banner::Success(message)) => Some(message),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self.current() {
            Some(Banner::Error(message)) => Some(message),
            _ => None,
        }
    }
}

impl Drop for Banners {
    fn drop(&mut self) {
        if let Some(timer) = self.lock().timer.take() {
            timer.abort();
        }
    }
}

async fn expire_later(state: Weak<Mutex<BannerState>>, generation: u64, delay: Duration) {
    tokio::time::sleep(delay).await;
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    if state.generation == generation {
        state.current = None;
        state.timer = None;
    }
}
