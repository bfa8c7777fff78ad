use std::ffi::c_char;

use anyhow::{bail, Result};
use gl::types::{GLenum, GLuint};

use crate::diag::{DiagnosticsSink, ScreenEvent, ShaderStage};

/// Compiles a single shader stage, reporting the info log through the sink
/// and failing with it on error.
pub(crate) unsafe fn compile(
    stage: GLenum,
    source: &str,
    diag: &dyn DiagnosticsSink,
) -> Result<GLuint> {
    let shader = gl::CreateShader(stage);
    let source_ptr = source.as_ptr() as *const c_char;
    let source_len = source.len() as i32;
    gl::ShaderSource(shader, 1, &source_ptr, &source_len);
    gl::CompileShader(shader);

    let mut status = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
    if status == 0 {
        let log = info_log(shader, true);
        let which = if stage == gl::FRAGMENT_SHADER {
            ShaderStage::Fragment
        } else {
            ShaderStage::Vertex
        };
        diag.event(ScreenEvent::ShaderError {
            stage: which,
            log: &log,
        });
        gl::DeleteShader(shader);
        bail!("{:?} shader compile error: {}", which, log);
    }

    Ok(shader)
}

/// Links the two stages into a program; the stage objects are deleted
/// whether or not the link succeeds.
pub(crate) unsafe fn link(
    vert: GLuint,
    frag: GLuint,
    diag: &dyn DiagnosticsSink,
) -> Result<GLuint> {
    let program = gl::CreateProgram();
    gl::AttachShader(program, vert);
    gl::AttachShader(program, frag);
    gl::LinkProgram(program);

    gl::DeleteShader(frag);
    gl::DeleteShader(vert);

    let mut status = 0;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
    if status == 0 {
        let log = info_log(program, false);
        diag.event(ScreenEvent::LinkError { log: &log });
        gl::DeleteProgram(program);
        bail!("shader link error: {}", log);
    }

    Ok(program)
}

unsafe fn info_log(object: GLuint, shader: bool) -> String {
    let mut len = 0;
    if shader {
        gl::GetShaderiv(object, gl::INFO_LOG_LENGTH, &mut len);
    } else {
        gl::GetProgramiv(object, gl::INFO_LOG_LENGTH, &mut len);
    }
    let mut buf = vec![0u8; len.max(1) as usize];
    if shader {
        gl::GetShaderInfoLog(object, len, std::ptr::null_mut(), buf.as_mut_ptr() as *mut c_char);
    } else {
        gl::GetProgramInfoLog(object, len, std::ptr::null_mut(), buf.as_mut_ptr() as *mut c_char);
    }
    String::from_utf8_lossy(&buf)
        .trim_end_matches('\0')
        .trim_end()
        .to_string()
}
