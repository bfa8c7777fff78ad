use gl::types::GLenum;

/// Structured events emitted by the presentation path.
#[derive(Debug, Clone, Copy)]
pub enum ScreenEvent<'a> {
    /// Context strings queried once at init.
    ContextInfo {
        version: &'a str,
        vendor: &'a str,
        renderer: &'a str,
        glsl_version: &'a str,
    },
    ShaderError { stage: ShaderStage, log: &'a str },
    LinkError { log: &'a str },
    /// A driver error drained from the GL error queue.
    GlError { code: GLenum, name: &'static str },
    /// The error queue keeps returning INVALID_OPERATION; there is no
    /// valid context on this thread and the poll itself is failing.
    InvalidContext,
    TextureResized { width: i32, height: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Diagnostics capability injected at construction; the host decides how
/// events are rendered or logged.
pub trait DiagnosticsSink {
    fn event(&self, event: ScreenEvent<'_>);
}

/// Default sink forwarding events to `tracing`.
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn event(&self, event: ScreenEvent<'_>) {
        match event {
            ScreenEvent::ContextInfo {
                version,
                vendor,
                renderer,
                glsl_version,
            } => {
                tracing::debug!(version, vendor, renderer, glsl_version, "GL context");
            }
            ScreenEvent::ShaderError { stage, log } => {
                tracing::error!(?stage, log, "shader compile error");
            }
            ScreenEvent::LinkError { log } => {
                tracing::error!(log, "shader link error");
            }
            ScreenEvent::GlError { code, name } => {
                tracing::debug!(code, name, "GL error");
            }
            ScreenEvent::InvalidContext => {
                tracing::error!("invalid OpenGL context");
            }
            ScreenEvent::TextureResized { width, height } => {
                tracing::debug!(width, height, "resized framebuffer texture");
            }
        }
    }
}

pub(crate) fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::INVALID_OPERATION => "INVALID_OPERATION",
        gl::INVALID_ENUM => "INVALID_ENUM",
        gl::INVALID_VALUE => "INVALID_VALUE",
        gl::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        _ => "unknown",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    Log,
    Fatal,
}

// glGetError itself raises INVALID_OPERATION when the calling thread has no
// current context, so an unbounded drain loop would spin forever. Count
// consecutive occurrences and give up past the threshold.
const INVALID_OP_LIMIT: u32 = 100;

#[derive(Debug, Default)]
pub(crate) struct ErrorMonitor {
    invalid_ops: u32,
}

impl ErrorMonitor {
    pub fn record(&mut self, code: GLenum) -> Disposition {
        if code == gl::INVALID_OPERATION {
            self.invalid_ops += 1;
            if self.invalid_ops >= INVALID_OP_LIMIT {
                return Disposition::Fatal;
            }
        } else {
            self.invalid_ops = 0;
        }
        Disposition::Log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_invalid_operation_trips_fatal() {
        let mut monitor = ErrorMonitor::default();
        for _ in 0..INVALID_OP_LIMIT - 1 {
            assert_eq!(monitor.record(gl::INVALID_OPERATION), Disposition::Log);
        }
        assert_eq!(monitor.record(gl::INVALID_OPERATION), Disposition::Fatal);
    }

    #[test]
    fn other_errors_reset_the_counter() {
        let mut monitor = ErrorMonitor::default();
        for _ in 0..INVALID_OP_LIMIT - 1 {
            monitor.record(gl::INVALID_OPERATION);
        }
        assert_eq!(monitor.record(gl::INVALID_ENUM), Disposition::Log);
        assert_eq!(monitor.record(gl::INVALID_OPERATION), Disposition::Log);
    }

    #[test]
    fn known_codes_map_to_names() {
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "OUT_OF_MEMORY");
        assert_eq!(error_name(gl::INVALID_VALUE), "INVALID_VALUE");
        assert_eq!(error_name(0xdead), "unknown");
    }
}
