use std::sync::Arc;

use winit::window::Window as WinitWindow;

use crate::display::Viewport;
use crate::frame::{FrameHandle, FrameScheduler};

/// Frame scheduler backed by winit redraw requests
///
/// winit cannot withdraw a redraw request, so `cancel` only forgets the
/// handle; the frame loop ignores the resulting `RedrawRequested`.
pub struct WinitScheduler {
    window: Arc<WinitWindow>,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl WinitScheduler {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self {
            window,
            next_id: 0,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}

impl FrameScheduler for WinitScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(handle);
        self.window.request_redraw();
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Current size and pixel density of a window
pub fn viewport_of(window: &WinitWindow) -> Viewport {
    let size = window.inner_size();
    Viewport::new(size.width, size.height, window.scale_factor())
}
