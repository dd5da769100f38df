pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod frame;
pub mod math;
pub mod mesh;
pub mod palette;
pub mod random;
pub mod renderer;
pub mod scene;
pub mod types;
pub mod window;

pub use display::{RenderTarget, RenderTargetDescriptor, Viewport};
pub use frame::{AnimationConfig, FrameLoop, FrameScheduler, ManualScheduler, Variant};
pub use scene::{build_scene, SceneConfig, SceneState};
