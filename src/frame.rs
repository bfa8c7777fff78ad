/// CPU-side frame produced by the emulated RDP pipeline.
///
/// Borrowed from the caller and read-only to the presentation path. Either
/// plane may be absent; when both are present they describe the same
/// `width`x`height` grid. `pitch` is the row stride in pixels and may exceed
/// `width` for padded buffers.
#[derive(Debug, Clone, Copy)]
pub struct FrameBuffer<'a> {
    pub width: i32,
    pub height: i32,
    pub pitch: i32,
    pub pixels: Option<&'a [u32]>,
    pub depth: Option<&'a [u32]>,
}

impl FrameBuffer<'_> {
    /// A frame with neither plane carries nothing to upload.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_none() && self.depth.is_none()
    }
}

/// Destination for screenshot/capture reads of the presented color surface.
///
/// Sized to the viewport active at read time; `pitch` always equals `width`
/// since readback rows are tightly packed.
#[derive(Debug, Default)]
pub struct ReadbackBuffer {
    pub width: i32,
    pub height: i32,
    pub pitch: i32,
    pub pixels: Vec<u32>,
}

impl ReadbackBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_with_no_planes_is_empty() {
        let fb = FrameBuffer {
            width: 320,
            height: 240,
            pitch: 320,
            pixels: None,
            depth: None,
        };
        assert!(fb.is_empty());
    }

    #[test]
    fn frame_with_only_one_plane_is_not_empty() {
        let pixels = vec![0u32; 320 * 240];
        let color_only = FrameBuffer {
            width: 320,
            height: 240,
            pitch: 320,
            pixels: Some(&pixels),
            depth: None,
        };
        let depth_only = FrameBuffer {
            width: 320,
            height: 240,
            pitch: 320,
            pixels: None,
            depth: Some(&pixels),
        };
        assert!(!color_only.is_empty());
        assert!(!depth_only.is_empty());
    }
}
