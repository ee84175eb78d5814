//! Responsive screen layout
//!
//! Positions the artwork and the kiosk controls for a given screen size. The
//! metrics were designed at 1440x900 and scale with the screen, within
//! limits, so hit targets stay usable on both small and large displays.

use crate::constants::layout::{
    BOTTOM_UI_RESERVED, FRAME_PAD, MAX_IMAGE_WIDTH_FRACTION, MAX_UI_SCALE, MIN_IMAGE_HEIGHT,
    MIN_IMAGE_WIDTH, MIN_UI_SCALE, REFERENCE_HEIGHT, REFERENCE_WIDTH, TOP_MARGIN,
};

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Square hit box around a circle, padded for easier clicking
    pub fn around_circle(center: (i32, i32), radius: i32, pad: i32) -> Self {
        let half = radius + pad;
        Self::new(center.0 - half, center.1 - half, half * 2, half * 2)
    }

    /// Button hit test, far edges included
    pub fn contains_inclusive(&self, (x, y): (i32, i32)) -> bool {
        self.x <= x && x <= self.x + self.width && self.y <= y && y <= self.y + self.height
    }

    /// Half-open hit test, used for the artwork pixels
    pub fn contains(&self, (x, y): (i32, i32)) -> bool {
        self.x <= x && x < self.x + self.width && self.y <= y && y < self.y + self.height
    }
}

/// UI scale factor relative to the reference resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiScale(f64);

impl UiScale {
    pub fn for_screen(width: u32, height: u32) -> Self {
        let raw = (width as f64 / REFERENCE_WIDTH).min(height as f64 / REFERENCE_HEIGHT);
        Self(raw.clamp(MIN_UI_SCALE, MAX_UI_SCALE))
    }

    pub fn factor(&self) -> f64 {
        self.0
    }

    /// Scale a reference metric, never below one pixel
    pub fn px(&self, v: i32) -> i32 {
        ((v as f64 * self.0) as i32).max(1)
    }
}

/// Positions of everything the visitor can see or touch
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub screen: (u32, u32),
    pub scale: UiScale,
    /// Where the artwork is drawn; also its size after scaling
    pub artwork: Rect,
    /// Decorative frame behind the artwork
    pub frame: Rect,
    pub start_button: Rect,
    pub exit_button: Rect,
    pub watch_button: Rect,
    pub sound_centers: [(i32, i32); 3],
    pub sound_buttons: [Rect; 3],
    pub delay_center: (i32, i32),
    pub delay_button: Rect,
    pub button_radius: i32,
}

impl Layout {
    /// Compute the layout for a screen and an artwork of the given size
    ///
    /// The artwork keeps its aspect ratio, fits within 72% of the screen width
    /// and the height left between the top margin and the control area, and
    /// is never smaller than 160x120.
    pub fn compute(screen_width: u32, screen_height: u32, image_width: u32, image_height: u32) -> Self {
        let scale = UiScale::for_screen(screen_width, screen_height);
        let s = |v: i32| scale.px(v);
        let w = screen_width as i32;
        let h = screen_height as i32;

        let top_margin = s(TOP_MARGIN);
        let bottom_reserved = s(BOTTOM_UI_RESERVED);
        let frame_pad = s(FRAME_PAD);

        let max_w = (screen_width as f64 * MAX_IMAGE_WIDTH_FRACTION) as i32;
        let max_h = MIN_IMAGE_HEIGHT.max(h - (top_margin + bottom_reserved));

        let aspect = image_width.max(1) as f64 / image_height.max(1) as f64;
        let mut new_h = max_h.min((max_w as f64 / aspect) as i32);
        let mut new_w = (new_h as f64 * aspect) as i32;
        if new_w > max_w {
            new_w = max_w;
            new_h = (new_w as f64 / aspect) as i32;
        }
        let new_w = new_w.max(MIN_IMAGE_WIDTH);
        let new_h = new_h.max(MIN_IMAGE_HEIGHT);

        let artwork = Rect::new((w - new_w).div_euclid(2), top_margin, new_w, new_h);
        let frame = Rect::new(
            artwork.x - frame_pad,
            artwork.y - frame_pad,
            new_w + frame_pad * 2,
            new_h + frame_pad * 2,
        );

        let start_button = Rect::new(w.div_euclid(2) - s(120), h.div_euclid(2) + s(20), s(240), s(64));
        let exit_button = Rect::new(w - s(150), s(20), s(130), s(52));

        let watch_w = s(170);
        let watch_h = s(48);
        let watch_button = Rect::new(
            w.div_euclid(2) - watch_w.div_euclid(2),
            artwork.y + new_h + s(100),
            watch_w,
            watch_h,
        );

        let radius = s(24);
        let gap = s(120);
        let click_pad = s(12);
        let circles_y = watch_button.y + watch_button.height + s(86);
        let circles_x0 = w.div_euclid(2) - gap;
        let sound_centers = [0, 1, 2].map(|i| (circles_x0 + gap * i, circles_y));
        let sound_buttons = sound_centers.map(|c| Rect::around_circle(c, radius, click_pad));

        let delay_center = (sound_centers[2].0 + s(120), sound_centers[2].1);
        let delay_button = Rect::around_circle(delay_center, radius, click_pad);

        Self {
            screen: (screen_width, screen_height),
            scale,
            artwork,
            frame,
            start_button,
            exit_button,
            watch_button,
            sound_centers,
            sound_buttons,
            delay_center,
            delay_button,
            button_radius: radius,
        }
    }

    /// Artwork size as `(width, height)` in pixels
    pub fn artwork_size(&self) -> (u32, u32) {
        (self.artwork.width as u32, self.artwork.height as u32)
    }

    /// Pointer position relative to the artwork, if it is over it
    pub fn artwork_local(&self, pointer: (i32, i32)) -> Option<(i32, i32)> {
        if self.artwork.contains(pointer) {
            Some((pointer.0 - self.artwork.x, pointer.1 - self.artwork.y))
        } else {
            None
        }
    }
}
