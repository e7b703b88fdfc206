//! GPU device and surface management.
//!
//! - creates the wgpu instance, adapter, device and queue for a window
//! - configures the surface and reconfigures it on resize
//! - acquires frames and hands out an encoder + view for rendering

mod error;
mod gpu;

pub use error::{MissingContext, SurfaceErrorAction};
pub use gpu::{Gpu, GpuFrame, GpuInit};
