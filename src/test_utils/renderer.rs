use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use parking_lot::Condvar;
use parking_lot::Mutex;

use crate::ButtonChoice;
use crate::RenderRequest;
use crate::Renderer;

/// Returns a fixed choice and keeps every request it was given.
pub(crate) struct RecordingRenderer {
    choice: ButtonChoice,
    requests: Mutex<Vec<RenderRequest>>,
}

impl RecordingRenderer {
    pub(crate) fn new(choice: ButtonChoice) -> Self {
        Self {
            choice,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RenderRequest> {
        self.requests.lock().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(
        &self,
        request: &RenderRequest,
    ) -> ButtonChoice {
        self.requests.lock().push(request.clone());
        self.choice
    }
}

/// Blocks every render call until [`release`](Self::release) hands out the
/// choice to return.
#[derive(Default)]
pub(crate) struct GatedRenderer {
    renders: AtomicUsize,
    gate: Mutex<Option<ButtonChoice>>,
    opened: Condvar,
}

impl GatedRenderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn release(
        &self,
        choice: ButtonChoice,
    ) {
        *self.gate.lock() = Some(choice);
        self.opened.notify_all();
    }

    /// Render calls started so far
    pub(crate) fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl Renderer for GatedRenderer {
    fn render(
        &self,
        _request: &RenderRequest,
    ) -> ButtonChoice {
        self.renders.fetch_add(1, Ordering::SeqCst);
        let mut gate = self.gate.lock();
        loop {
            if let Some(choice) = *gate {
                return choice;
            }
            self.opened.wait(&mut gate);
        }
    }
}
