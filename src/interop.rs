use gl::types::GLuint;

/// Extension point for mapping the upload scratch buffer into an external
/// compute context (CUDA/OpenCL interop) after each frame upload.
///
/// Implementations may map `buffer`, run kernels against it, and must unmap
/// it before returning: the driver forbids sampling a buffer through the
/// graphics pipeline while it is mapped elsewhere, and `GlScreen::render`
/// may run immediately after this hook.
pub trait ComputeInterop {
    fn on_uploaded(&mut self, buffer: GLuint, width: i32, height: i32);
}

/// Default implementation: no compute pass, the upload path reduces to a
/// straight texture write.
pub struct NoInterop;

impl ComputeInterop for NoInterop {
    fn on_uploaded(&mut self, _buffer: GLuint, _width: i32, _height: i32) {}
}
