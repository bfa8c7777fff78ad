//! Frame presentation for an emulated RDP graphics pipeline.
//!
//! Takes the CPU-side color and depth buffers produced by the upstream
//! rasterizer and presents them through a pair of GPU textures, preserving
//! the source aspect ratio inside an arbitrarily sized window. Texture
//! storage is reallocated only when the frame size actually changes; same
//! size frames re-upload in place.
//!
//! The host owns the GL context and window surface. It hands over a proc
//! loader at init and calls `upload`/`render`/`clear` from the
//! context-owning thread:
//!
//! ```no_run
//! use rdp_screen::{FrameBuffer, GlScreen, ScreenConfig};
//!
//! # fn get_proc_address(_name: &str) -> *const std::ffi::c_void { std::ptr::null() }
//! let config = ScreenConfig::default();
//! let mut screen = GlScreen::new(&config, |name| get_proc_address(name))?;
//!
//! let pixels = vec![0u32; 320 * 240];
//! let frame = FrameBuffer {
//!     width: 320,
//!     height: 240,
//!     pitch: 320,
//!     pixels: Some(&pixels),
//!     depth: None,
//! };
//! screen.upload(&frame, 240);
//! screen.render(800, 600, 0, 0);
//! screen.close();
//! # anyhow::Ok(())
//! ```

pub mod diag;
pub mod frame;
pub mod interop;
pub mod render;

pub use diag::{DiagnosticsSink, ScreenEvent, ShaderStage, TracingSink};
pub use frame::{FrameBuffer, ReadbackBuffer};
pub use interop::{ComputeInterop, NoInterop};
pub use render::{FilterMode, GlDialect, GlScreen, ScreenConfig, Viewport};
