use std::ffi::{c_char, c_void, CStr};
use std::ptr;

use anyhow::Result;
use gl::types::{GLenum, GLint, GLuint};

use crate::diag::{DiagnosticsSink, ErrorMonitor, ScreenEvent, TracingSink};
use crate::frame::{FrameBuffer, ReadbackBuffer};
use crate::interop::{ComputeInterop, NoInterop};
use crate::render::textures::{TextureSet, COLOR_UNIT, DEPTH_UNIT};
use crate::render::{shader, viewport, FormatProfile, ScreenConfig};

#[cfg(debug_assertions)]
use crate::diag::{error_name, Disposition};

/// The presentation pipeline: owns the shader program, the dummy VAO, the
/// color/depth texture pair, and the compute-interop scratch buffer.
///
/// All state lives in this value; two screens on two contexts do not
/// interfere. Every method must run on the thread owning the GL context,
/// and `upload` and `render` are never reentrant.
pub struct GlScreen {
    program: GLuint,
    vao: GLuint,
    textures: TextureSet,
    interop_buffer: GLuint,
    display_height: i32,
    profile: FormatProfile,
    diag: Box<dyn DiagnosticsSink>,
    interop: Box<dyn ComputeInterop>,
    monitor: ErrorMonitor,
}

impl GlScreen {
    /// Sets up the pipeline on the current context with the default
    /// tracing sink and no compute interop.
    pub fn new<F>(config: &ScreenConfig, loader: F) -> Result<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        Self::with_hooks(config, loader, Box::new(TracingSink), Box::new(NoInterop))
    }

    /// Full constructor: loads GL entry points through the host-supplied
    /// proc loader, compiles and links the presentation program, and
    /// creates the texture pair. Fails with the compiler/linker log if the
    /// program cannot be built; no process abort on that path.
    pub fn with_hooks<F>(
        config: &ScreenConfig,
        loader: F,
        diag: Box<dyn DiagnosticsSink>,
        interop: Box<dyn ComputeInterop>,
    ) -> Result<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let profile = config.dialect.profile();

        unsafe {
            let version = gl_string(gl::VERSION);
            let vendor = gl_string(gl::VENDOR);
            let renderer = gl_string(gl::RENDERER);
            let glsl_version = gl_string(gl::SHADING_LANGUAGE_VERSION);
            diag.event(ScreenEvent::ContextInfo {
                version: &version,
                vendor: &vendor,
                renderer: &renderer,
                glsl_version: &glsl_version,
            });

            // fullscreen clipped triangle driven entirely by gl_VertexID,
            // so no position VBO is needed
            let vert_source = format!(
                "{}\
                 out vec2 uv;\n\
                 void main(void) {{\n\
                 \x20   uv = vec2((gl_VertexID << 1) & 2, gl_VertexID & 2);\n\
                 \x20   gl_Position = vec4(uv * vec2(2.0, -2.0) + vec2(-1.0, 1.0), 0.0, 1.0);\n\
                 }}\n",
                profile.shader_header
            );

            let color_write = if profile.swap_channels {
                "    color.bgra = texture(ColorValueTexture, uv);\n"
            } else {
                "    color = texture(ColorValueTexture, uv);\n"
            };
            let frag_source = format!(
                "{}\
                 in vec2 uv;\n\
                 layout(location = 0) out vec4 color;\n\
                 uniform sampler2D ColorValueTexture;\n\
                 uniform sampler2D DepthValueTexture;\n\
                 void main(void) {{\n\
                 {}\
                 \x20   gl_FragDepth = texture(DepthValueTexture, uv).r;\n\
                 }}\n",
                profile.shader_header, color_write
            );

            let vert = shader::compile(gl::VERTEX_SHADER, &vert_source, diag.as_ref())?;
            let frag = shader::compile(gl::FRAGMENT_SHADER, &frag_source, diag.as_ref())?;
            let program = shader::link(vert, frag, diag.as_ref())?;

            let depth_loc =
                gl::GetUniformLocation(program, b"DepthValueTexture\0".as_ptr() as *const c_char);
            let color_loc =
                gl::GetUniformLocation(program, b"ColorValueTexture\0".as_ptr() as *const c_char);

            gl::UseProgram(program);
            gl::Uniform1i(depth_loc, DEPTH_UNIT as GLint);
            gl::Uniform1i(color_loc, COLOR_UNIT as GLint);

            // dummy VAO; core profiles refuse to draw without one bound
            let mut vao = 0;
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            let textures = TextureSet::create(config.filter.gl_param());

            let mut interop_buffer = 0;
            gl::GenBuffers(1, &mut interop_buffer);

            let mut screen = Self {
                program,
                vao,
                textures,
                interop_buffer,
                display_height: 0,
                profile,
                diag,
                interop,
                monitor: ErrorMonitor::default(),
            };
            screen.check_errors();
            Ok(screen)
        }
    }

    /// Pushes a CPU-side frame into the texture pair, reallocating both
    /// textures first when the frame size changed. Absent planes are
    /// skipped; a frame with neither plane is a no-op. Returns whether a
    /// reallocation happened.
    pub fn upload(&mut self, fb: &FrameBuffer<'_>, output_height: i32) -> bool {
        if fb.is_empty() {
            return false;
        }

        let resized = unsafe {
            self.textures
                .ensure_capacity(fb.width, fb.height, &self.profile)
        };

        if resized {
            unsafe {
                // scratch buffer handed to the compute hook, four floats
                // per texel, resized in step with the textures
                gl::BindBuffer(gl::ARRAY_BUFFER, self.interop_buffer);
                let size =
                    fb.width as isize * fb.height as isize * 4 * std::mem::size_of::<f32>() as isize;
                gl::BufferData(gl::ARRAY_BUFFER, size, ptr::null(), gl::DYNAMIC_DRAW);
                gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            }
            self.diag.event(ScreenEvent::TextureResized {
                width: fb.width,
                height: fb.height,
            });
        }

        unsafe {
            if let Some(pixels) = fb.pixels {
                self.textures.write_color(pixels, fb.pitch, &self.profile);
            }
            if let Some(depth) = fb.depth {
                self.textures.write_depth(depth, fb.pitch, &self.profile);
            }
        }

        // the hook must unmap the buffer before render() touches the pipeline
        self.interop
            .on_uploaded(self.interop_buffer, fb.width, fb.height);

        self.check_errors();

        self.display_height = output_height;

        resized
    }

    /// Presents the uploaded frame into the window rectangle: fits the
    /// viewport, draws the color pass, then the depth pass with depth
    /// testing enabled and color writes masked off.
    pub fn render(&mut self, win_width: i32, win_height: i32, win_x: i32, win_y: i32) {
        let extent = self.textures.extent();
        let vp = viewport::fit(
            extent.width,
            self.display_height,
            win_width,
            win_height,
            win_x,
            win_y,
        );

        unsafe {
            gl::Viewport(vp.x, vp.y, vp.width, vp.height);

            gl::ActiveTexture(gl::TEXTURE0 + COLOR_UNIT);
            gl::BindTexture(gl::TEXTURE_2D, self.textures.color_id());
            gl::DrawArrays(gl::TRIANGLES, 0, 3);

            gl::ActiveTexture(gl::TEXTURE0 + DEPTH_UNIT);
            gl::BindTexture(gl::TEXTURE_2D, self.textures.depth_id());
            gl::ColorMask(gl::FALSE, gl::FALSE, gl::FALSE, gl::FALSE);
            gl::Enable(gl::DEPTH_TEST);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
            gl::Disable(gl::DEPTH_TEST);
            gl::ColorMask(gl::TRUE, gl::TRUE, gl::TRUE, gl::TRUE);
        }

        self.check_errors();
    }

    /// Clears the color and depth attachments of the destination surface.
    pub fn clear(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
        self.check_errors();
    }

    /// Reads the presented color surface back into `out`, sized to the
    /// current viewport. Screenshot path, not part of the per-frame loop.
    pub fn read_back(&mut self, out: &mut ReadbackBuffer, alpha: bool) {
        unsafe {
            let mut vp = [0 as GLint; 4];
            gl::GetIntegerv(gl::VIEWPORT, vp.as_mut_ptr());

            out.width = vp[2];
            out.height = vp[3];
            out.pitch = out.width;
            out.pixels.resize((vp[2] * vp[3]).max(0) as usize, 0);

            gl::ReadPixels(
                vp[0],
                vp[1],
                vp[2],
                vp[3],
                if alpha { gl::RGBA } else { gl::RGB },
                self.profile.tex_type,
                out.pixels.as_mut_ptr() as *mut c_void,
            );
        }
        self.check_errors();
    }

    /// Releases the textures, the interop buffer, the VAO, and the program,
    /// and zeroes the tracked dimensions so a later init starts clean.
    /// Safe to call more than once.
    pub fn close(&mut self) {
        if self.program == 0 {
            return;
        }

        self.display_height = 0;

        unsafe {
            self.textures.delete();
            gl::DeleteBuffers(1, &self.interop_buffer);
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteProgram(self.program);
        }

        self.interop_buffer = 0;
        self.vao = 0;
        self.program = 0;
    }

    /// Dimensions currently allocated for the texture pair.
    pub fn texture_size(&self) -> (i32, i32) {
        let extent = self.textures.extent();
        (extent.width, extent.height)
    }

    /// Vertical extent treated as visible for aspect-ratio purposes.
    pub fn display_height(&self) -> i32 {
        self.display_height
    }

    // Drains the GL error queue after a batch of calls. Diagnostic builds
    // only; release builds skip the round trips entirely.
    #[cfg(debug_assertions)]
    fn check_errors(&mut self) {
        loop {
            let err = unsafe { gl::GetError() };
            if err == gl::NO_ERROR {
                break;
            }
            match self.monitor.record(err) {
                Disposition::Log => self.diag.event(ScreenEvent::GlError {
                    code: err,
                    name: error_name(err),
                }),
                Disposition::Fatal => {
                    self.diag.event(ScreenEvent::InvalidContext);
                    panic!("gl error poll: invalid OpenGL context");
                }
            }
        }
    }

    #[cfg(not(debug_assertions))]
    fn check_errors(&mut self) {}
}

impl Drop for GlScreen {
    fn drop(&mut self) {
        self.close();
    }
}

unsafe fn gl_string(name: GLenum) -> String {
    let ptr = gl::GetString(name);
    if ptr.is_null() {
        "unknown".to_string()
    } else {
        CStr::from_ptr(ptr as *const c_char)
            .to_string_lossy()
            .into_owned()
    }
}
