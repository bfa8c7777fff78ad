pub mod screen;
pub mod shader;
pub mod textures;
pub mod viewport;

pub use screen::GlScreen;
pub use viewport::Viewport;

use anyhow::Result;
use gl::types::{GLenum, GLint};
use serde::{Deserialize, Serialize};

/// Texture sampling filter, fixed at initialization.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Sharp pixels, no interpolation
    #[default]
    Nearest,
    /// Bilinear interpolation
    Linear,
}

impl FilterMode {
    pub(crate) fn gl_param(self) -> GLint {
        match self {
            FilterMode::Nearest => gl::NEAREST as GLint,
            FilterMode::Linear => gl::LINEAR as GLint,
        }
    }
}

/// Which GL dialect the host context speaks. Selects the shader header and
/// the upload format at runtime instead of at compile time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlDialect {
    /// Desktop OpenGL 3.3 core profile
    #[default]
    Core33,
    /// OpenGL ES 3.0
    Gles3,
}

/// Format constants resolved from the dialect once at init.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FormatProfile {
    pub shader_header: &'static str,
    pub tex_format: GLenum,
    pub tex_type: GLenum,
    /// Source texels are BGRA-packed relative to the display format; the
    /// fragment shader swizzles them back.
    pub swap_channels: bool,
}

impl GlDialect {
    pub(crate) fn profile(self) -> FormatProfile {
        match self {
            GlDialect::Core33 => FormatProfile {
                shader_header: "#version 330 core\n",
                tex_format: gl::BGRA,
                tex_type: gl::UNSIGNED_INT_8_8_8_8_REV,
                swap_channels: true,
            },
            GlDialect::Gles3 => FormatProfile {
                shader_header: "#version 300 es\nprecision lowp float;\n",
                tex_format: gl::RGBA,
                tex_type: gl::UNSIGNED_BYTE,
                swap_channels: false,
            },
        }
    }
}

/// Host-facing presentation configuration, read once at initialization.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub filter: FilterMode,
    pub dialect: GlDialect,
}

impl ScreenConfig {
    /// Parses a config fragment from the host's JSON settings.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_profile_uploads_reversed_bgra() {
        let profile = GlDialect::Core33.profile();
        assert_eq!(profile.tex_format, gl::BGRA);
        assert_eq!(profile.tex_type, gl::UNSIGNED_INT_8_8_8_8_REV);
        assert!(profile.swap_channels);
        assert!(profile.shader_header.contains("330 core"));
    }

    #[test]
    fn gles_profile_uploads_plain_rgba() {
        let profile = GlDialect::Gles3.profile();
        assert_eq!(profile.tex_format, gl::RGBA);
        assert_eq!(profile.tex_type, gl::UNSIGNED_BYTE);
        assert!(!profile.swap_channels);
        assert!(profile.shader_header.contains("300 es"));
        assert!(profile.shader_header.contains("precision lowp float"));
    }

    #[test]
    fn filter_maps_to_gl_constants() {
        assert_eq!(FilterMode::Nearest.gl_param(), gl::NEAREST as GLint);
        assert_eq!(FilterMode::Linear.gl_param(), gl::LINEAR as GLint);
    }

    #[test]
    fn config_parses_from_host_json() {
        let config = ScreenConfig::from_json(r#"{"filter":"linear","dialect":"gles3"}"#).unwrap();
        assert!(matches!(config.filter, FilterMode::Linear));
        assert!(matches!(config.dialect, GlDialect::Gles3));

        // missing fields fall back to defaults
        let config = ScreenConfig::from_json("{}").unwrap();
        assert!(matches!(config.filter, FilterMode::Nearest));
        assert!(matches!(config.dialect, GlDialect::Core33));
    }
}
