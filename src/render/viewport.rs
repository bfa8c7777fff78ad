/// Destination rectangle within the window, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Fits the source image into the window, adding letterboxes or pillarboxes
/// when the window has a different aspect ratio than the current display
/// mode.
///
/// All arithmetic is integral: aspect ratios are compared by
/// cross-multiplication and the fitted extent uses truncating division, so
/// centering is exact to the pixel and equal ratios collapse to the full
/// window with no bars.
pub fn fit(
    source_width: i32,
    display_height: i32,
    mut win_width: i32,
    mut win_height: i32,
    mut win_x: i32,
    mut win_y: i32,
) -> Viewport {
    let hw = display_height * win_width;
    let wh = source_width * win_height;

    if hw > wh {
        // window relatively wider than the source: pillarbox
        let w_max = wh / display_height;
        win_x += (win_width - w_max) / 2;
        win_width = w_max;
    } else if hw < wh {
        // window relatively taller: letterbox
        let h_max = hw / source_width;
        win_y += (win_height - h_max) / 2;
        win_height = h_max;
    }

    Viewport {
        x: win_x,
        y: win_y,
        width: win_width,
        height: win_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ratios_fill_the_window() {
        // 320x240 into 800x600 and 1024x768: both 4:3, no bars
        assert_eq!(
            fit(320, 240, 800, 600, 0, 0),
            Viewport { x: 0, y: 0, width: 800, height: 600 }
        );
        assert_eq!(
            fit(320, 240, 1024, 768, 0, 0),
            Viewport { x: 0, y: 0, width: 1024, height: 768 }
        );
    }

    #[test]
    fn taller_window_letterboxes() {
        // 320x200 into 800x600: hw=160000 < wh=192000, h_max=500
        assert_eq!(
            fit(320, 200, 800, 600, 0, 0),
            Viewport { x: 0, y: 50, width: 800, height: 500 }
        );
    }

    #[test]
    fn wider_window_pillarboxes() {
        // 320x240 into 1600x600: hw=384000 > wh=192000, w_max=800
        assert_eq!(
            fit(320, 240, 1600, 600, 0, 0),
            Viewport { x: 400, y: 0, width: 800, height: 600 }
        );
    }

    #[test]
    fn window_origin_offsets_carry_through() {
        let vp = fit(320, 200, 800, 600, 10, 20);
        assert_eq!(vp, Viewport { x: 10, y: 70, width: 800, height: 500 });

        let vp = fit(320, 240, 1600, 600, 10, 20);
        assert_eq!(vp, Viewport { x: 410, y: 20, width: 800, height: 600 });
    }

    #[test]
    fn odd_bar_totals_split_within_one_pixel() {
        // hw = 200*800 = 160000, wh = 320*601 = 192320, h_max = 500:
        // 101 bar pixels split 50/51
        let vp = fit(320, 200, 800, 601, 0, 0);
        assert_eq!(vp.height, 500);
        assert_eq!(vp.y, 50);
        let top = vp.y;
        let bottom = 601 - (vp.y + vp.height);
        assert!((top - bottom).abs() <= 1);
        assert_ne!(top, bottom);
    }

    #[test]
    fn fitted_viewport_stays_inside_the_window() {
        let sources = [(320, 240), (320, 200), (640, 480), (256, 224), (640, 240)];
        let windows = [(800, 600), (1024, 768), (1920, 1080), (640, 480), (333, 777)];
        for &(sw, dh) in &sources {
            for &(ww, wh_) in &windows {
                let vp = fit(sw, dh, ww, wh_, 0, 0);
                assert!(vp.x >= 0 && vp.y >= 0, "{sw}x{dh} in {ww}x{wh_}");
                assert!(vp.x + vp.width <= ww, "{sw}x{dh} in {ww}x{wh_}");
                assert!(vp.y + vp.height <= wh_, "{sw}x{dh} in {ww}x{wh_}");
                // the dominant axis always fills the window
                assert!(vp.width == ww || vp.height == wh_);
                // bars on the other axis differ by at most one pixel
                let dx = (ww - vp.width - 2 * vp.x).abs();
                let dy = (wh_ - vp.height - 2 * vp.y).abs();
                assert!(dx <= 1 && dy <= 1);
            }
        }
    }
}
