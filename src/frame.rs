use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::display::RenderTarget;
use crate::scene::SceneState;

pub const DEFAULT_ROTATION_STEP: f64 = 0.01;

/// Which per-frame behaviour the loop runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Spin the primary cube and counter-spin the random batch
    #[default]
    Animated,
    /// Render and reschedule only
    Baseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub variant: Variant,
    /// Radians added per frame on each axis
    pub rotation_step: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Animated,
            rotation_step: DEFAULT_ROTATION_STEP,
        }
    }
}

/// Ticket for one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// "Run before next repaint" primitive supplied by the host
pub trait FrameScheduler {
    /// Arrange for the loop to be ticked on the next display refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a previously requested frame
    fn cancel(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand, for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.requested += 1;
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created, first frame not yet run
    Idle,
    /// A frame is scheduled or running
    Running,
    /// Cancelled or failed; ticks are ignored
    Stopped,
}

/// Self-rescheduling per-frame update loop
///
/// Each iteration mutates the scene according to the variant, asks the
/// render target to draw it and requests the next frame from the
/// scheduler. At most one frame is pending at any time.
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    animation: AnimationConfig,
    state: LoopState,
    pending: Option<FrameHandle>,
    frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S, animation: AnimationConfig) -> Self {
        Self {
            scheduler,
            animation,
            state: LoopState::Idle,
            pending: None,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Completed iterations
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Run the first iteration immediately and schedule the next one
    pub fn start<T>(&mut self, scene: &mut SceneState, target: &mut T) -> anyhow::Result<()>
    where
        T: RenderTarget + ?Sized,
    {
        if self.state != LoopState::Idle {
            return Ok(());
        }

        log::debug!(
            "Frame loop starting ({:?}, step {})",
            self.animation.variant,
            self.animation.rotation_step
        );
        self.state = LoopState::Running;
        self.iterate(scene, target)
    }

    /// Run the scheduled iteration, if there is one
    pub fn tick<T>(&mut self, scene: &mut SceneState, target: &mut T) -> anyhow::Result<()>
    where
        T: RenderTarget + ?Sized,
    {
        if self.state != LoopState::Running || self.pending.take().is_none() {
            return Ok(());
        }
        self.iterate(scene, target)
    }

    /// Cancel the pending frame; later ticks do nothing
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        if self.state != LoopState::Stopped {
            log::debug!("Frame loop stopped after {} frames", self.frames);
        }
        self.state = LoopState::Stopped;
    }

    fn iterate<T>(&mut self, scene: &mut SceneState, target: &mut T) -> anyhow::Result<()>
    where
        T: RenderTarget + ?Sized,
    {
        if self.animation.variant == Variant::Animated {
            scene.spin(self.animation.rotation_step);
        }

        let rendered = scene
            .camera()
            .and_then(|camera| target.render(&scene.graph, camera));
        if let Err(e) = rendered {
            self.state = LoopState::Stopped;
            return Err(e);
        }

        self.frames += 1;
        self.pending = Some(self.scheduler.request_frame());
        Ok(())
    }
}
