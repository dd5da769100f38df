pub mod clock;
pub mod gpu_context;

pub use clock::{Clock, FrameStats};
pub use gpu_context::GpuContext;
