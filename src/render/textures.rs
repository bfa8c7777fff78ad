use std::ffi::c_void;
use std::ptr;

use gl::types::{GLint, GLuint};

use crate::render::FormatProfile;

/// Sampling unit assignments, fixed for the lifetime of the program: the
/// depth texture stays bound on unit 0 and the color texture on unit 1.
pub(crate) const DEPTH_UNIT: u32 = 0;
pub(crate) const COLOR_UNIT: u32 = 1;

/// Dimensions currently allocated on the GPU. A single extent covers both
/// textures, so they cannot diverge in size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TexExtent {
    pub width: i32,
    pub height: i32,
}

impl TexExtent {
    /// Records a requested size, returning whether it differs from the
    /// current one. The extent advances only on change.
    pub fn apply(&mut self, width: i32, height: i32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn reset(&mut self) {
        *self = TexExtent::default();
    }
}

/// The paired color and depth textures backing presentation. The pair is
/// created, resized, and deleted as one unit.
pub(crate) struct TextureSet {
    color: GLuint,
    depth: GLuint,
    extent: TexExtent,
}

impl TextureSet {
    /// Generates both textures on their fixed units with the configured
    /// filter. Storage is allocated lazily by `ensure_capacity`.
    pub unsafe fn create(filter: GLint) -> Self {
        let mut depth = 0;
        gl::ActiveTexture(gl::TEXTURE0 + DEPTH_UNIT);
        gl::GenTextures(1, &mut depth);
        gl::BindTexture(gl::TEXTURE_2D, depth);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter);

        let mut color = 0;
        gl::ActiveTexture(gl::TEXTURE0 + COLOR_UNIT);
        gl::GenTextures(1, &mut color);
        gl::BindTexture(gl::TEXTURE_2D, color);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter);

        Self {
            color,
            depth,
            extent: TexExtent::default(),
        }
    }

    pub fn extent(&self) -> TexExtent {
        self.extent
    }

    pub fn color_id(&self) -> GLuint {
        self.color
    }

    pub fn depth_id(&self) -> GLuint {
        self.depth
    }

    /// Reallocates storage for both textures when the requested size differs
    /// from the allocated one. Returns `true` only when a reallocation
    /// happened; matching sizes leave the GPU untouched. Contents after a
    /// reallocation are undefined until the next write.
    pub unsafe fn ensure_capacity(
        &mut self,
        width: i32,
        height: i32,
        profile: &FormatProfile,
    ) -> bool {
        if !self.extent.apply(width, height) {
            return false;
        }

        gl::ActiveTexture(gl::TEXTURE0 + COLOR_UNIT);
        gl::BindTexture(gl::TEXTURE_2D, self.color);
        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA as GLint,
            width,
            height,
            0,
            profile.tex_format,
            profile.tex_type,
            ptr::null(),
        );

        gl::ActiveTexture(gl::TEXTURE0 + DEPTH_UNIT);
        gl::BindTexture(gl::TEXTURE_2D, self.depth);
        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA as GLint,
            width,
            height,
            0,
            profile.tex_format,
            profile.tex_type,
            ptr::null(),
        );

        true
    }

    /// Uploads color samples over the whole current extent. Depth writes are
    /// masked off for the duration so the transfer cannot touch the depth
    /// attachment state.
    pub unsafe fn write_color(&self, pixels: &[u32], pitch: i32, profile: &FormatProfile) {
        gl::ActiveTexture(gl::TEXTURE0 + COLOR_UNIT);
        gl::BindTexture(gl::TEXTURE_2D, self.color);

        // source rows are pitch pixels apart, which may exceed the width
        gl::PixelStorei(gl::UNPACK_ROW_LENGTH, pitch);

        gl::DepthMask(gl::FALSE);
        gl::TexSubImage2D(
            gl::TEXTURE_2D,
            0,
            0,
            0,
            self.extent.width,
            self.extent.height,
            profile.tex_format,
            profile.tex_type,
            pixels.as_ptr() as *const c_void,
        );
        gl::DepthMask(gl::TRUE);
    }

    /// Uploads depth samples over the whole current extent. Color writes are
    /// disabled and depth testing enabled only for the duration of the
    /// transfer, then both restored.
    pub unsafe fn write_depth(&self, depth: &[u32], pitch: i32, profile: &FormatProfile) {
        gl::ActiveTexture(gl::TEXTURE0 + DEPTH_UNIT);
        gl::BindTexture(gl::TEXTURE_2D, self.depth);

        gl::PixelStorei(gl::UNPACK_ROW_LENGTH, pitch);

        gl::ColorMask(gl::FALSE, gl::FALSE, gl::FALSE, gl::FALSE);
        gl::Enable(gl::DEPTH_TEST);
        gl::TexSubImage2D(
            gl::TEXTURE_2D,
            0,
            0,
            0,
            self.extent.width,
            self.extent.height,
            profile.tex_format,
            profile.tex_type,
            depth.as_ptr() as *const c_void,
        );
        gl::ColorMask(gl::TRUE, gl::TRUE, gl::TRUE, gl::TRUE);
        gl::Disable(gl::DEPTH_TEST);
    }

    /// Deletes both textures and zeroes the extent.
    pub unsafe fn delete(&mut self) {
        gl::DeleteTextures(1, &self.color);
        gl::DeleteTextures(1, &self.depth);
        self.color = 0;
        self.depth = 0;
        self.extent.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_advances_only_on_change() {
        let mut extent = TexExtent::default();
        assert!(extent.apply(320, 240));
        assert_eq!(extent, TexExtent { width: 320, height: 240 });

        // same size again: no reallocation
        assert!(!extent.apply(320, 240));
        assert_eq!(extent, TexExtent { width: 320, height: 240 });

        assert!(extent.apply(640, 480));
        assert_eq!(extent, TexExtent { width: 640, height: 480 });
    }

    #[test]
    fn single_axis_change_still_counts() {
        let mut extent = TexExtent::default();
        extent.apply(320, 240);
        assert!(extent.apply(320, 480));
        assert!(extent.apply(640, 480));
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut extent = TexExtent::default();
        extent.apply(320, 240);
        extent.reset();
        assert_eq!(extent, TexExtent::default());
        // a fresh frame after reset reallocates
        assert!(extent.apply(320, 240));
    }
}
