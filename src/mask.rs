//! Pixel occupancy masks used for pixel-accurate collision checks.

use crate::config::MASK_ALPHA_THRESHOLD;

/// A pixel inside a mask, in that mask's own coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskPoint {
    pub x: usize,
    pub y: usize,
}

/// Per-pixel solid/empty map of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Mask {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn from_fn<F>(width: usize, height: usize, mut solid: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut mask = Mask::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.bits[y * width + x] = solid(x, y);
            }
        }
        mask
    }

    /// Builds a mask from tightly packed RGBA8 pixels. Pixels whose alpha is above
    /// the threshold are solid; a short buffer leaves the remaining pixels empty.
    pub fn from_rgba(width: usize, height: usize, bytes: &[u8]) -> Self {
        Mask::from_fn(width, height, |x, y| {
            let alpha_index = (y * width + x) * 4 + 3;
            bytes
                .get(alpha_index)
                .is_some_and(|&alpha| alpha > MASK_ALPHA_THRESHOLD)
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Number of solid pixels.
    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Rotates the mask counter-clockwise (as seen on screen) by `angle_deg` around
    /// its centre. The result is sized to the rotated bounding box and shares the
    /// same centre point.
    pub fn rotated(&self, angle_deg: f64) -> Mask {
        let radians = angle_deg.to_radians();
        let (sin, cos) = radians.sin_cos();

        let w = self.width as f64;
        let h = self.height as f64;
        // Round away float noise before ceil so 0/90/180 degrees keep exact sizes
        let new_w = ((w * cos.abs() + h * sin.abs()) * 1e6).round() / 1e6;
        let new_h = ((w * sin.abs() + h * cos.abs()) * 1e6).round() / 1e6;
        let new_w = new_w.ceil() as usize;
        let new_h = new_h.ceil() as usize;

        let src_cx = w / 2.0;
        let src_cy = h / 2.0;
        let dst_cx = new_w as f64 / 2.0;
        let dst_cy = new_h as f64 / 2.0;

        Mask::from_fn(new_w, new_h, |x, y| {
            // Sample at pixel centres, mapping destination back into the source
            let rx = x as f64 + 0.5 - dst_cx;
            let ry = y as f64 + 0.5 - dst_cy;
            let sx = rx * cos - ry * sin + src_cx;
            let sy = rx * sin + ry * cos + src_cy;
            if sx < 0.0 || sy < 0.0 {
                return false;
            }
            self.get(sx.floor() as usize, sy.floor() as usize)
        })
    }

    /// Tests `other`, placed at `offset` relative to this mask's origin, for overlap.
    /// Returns the first shared solid pixel in this mask's coordinates, scanning
    /// rows top to bottom and each row left to right.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<MaskPoint> {
        let (dx, dy) = (offset.0 as i64, offset.1 as i64);

        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (dx + other.width as i64).min(self.width as i64);
        let y_end = (dy + other.height as i64).min(self.height as i64);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let (sx, sy) = (x as usize, y as usize);
                let (ox, oy) = ((x - dx) as usize, (y - dy) as usize);
                if self.bits[sy * self.width + sx] && other.bits[oy * other.width + ox] {
                    return Some(MaskPoint { x: sx, y: sy });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: usize, height: usize) -> Mask {
        Mask::from_fn(width, height, |_, _| true)
    }

    #[test]
    fn test_from_rgba_uses_alpha_threshold() {
        // 2x1 image: first pixel opaque, second transparent
        let bytes = [255, 0, 0, 255, 255, 0, 0, 10];
        let mask = Mask::from_rgba(2, 1, &bytes);
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert_eq!(mask.count(), 1);

        // Exactly at the threshold is still empty
        let bytes = [0, 0, 0, MASK_ALPHA_THRESHOLD];
        assert_eq!(Mask::from_rgba(1, 1, &bytes).count(), 0);
    }

    #[test]
    fn test_overlap_reports_first_point_in_row_order() {
        let track = filled(10, 10);
        let car = filled(3, 3);

        assert_eq!(track.overlap(&car, (4, 5)), Some(MaskPoint { x: 4, y: 5 }));
        // Partially off the top-left edge still reports the top-left shared pixel
        assert_eq!(track.overlap(&car, (-2, -1)), Some(MaskPoint { x: 0, y: 0 }));
    }

    #[test]
    fn test_overlap_misses_when_disjoint() {
        let track = filled(10, 10);
        let car = filled(3, 3);

        assert_eq!(track.overlap(&car, (10, 0)), None);
        assert_eq!(track.overlap(&car, (0, -3)), None);
        assert_eq!(track.overlap(&car, (-100, 200)), None);
    }

    #[test]
    fn test_overlap_respects_empty_pixels() {
        // Ring: only the border pixels are solid
        let ring = Mask::from_fn(10, 10, |x, y| x == 0 || y == 0 || x == 9 || y == 9);
        let car = filled(3, 3);

        assert_eq!(ring.overlap(&car, (3, 3)), None);
        assert_eq!(ring.overlap(&car, (7, 4)), Some(MaskPoint { x: 9, y: 4 }));
    }

    #[test]
    fn test_rotation_keeps_size_on_right_angles() {
        let car = filled(4, 8);

        let same = car.rotated(0.0);
        assert_eq!((same.width(), same.height()), (4, 8));
        assert_eq!(same, car);

        let quarter = car.rotated(90.0);
        assert_eq!((quarter.width(), quarter.height()), (8, 4));
        assert_eq!(quarter.count(), 32);

        let half = car.rotated(180.0);
        assert_eq!((half.width(), half.height()), (4, 8));
        assert_eq!(half.count(), 32);
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        // Only the top row is solid (the "nose" of a car facing up)
        let nose = Mask::from_fn(4, 8, |_, y| y == 0);

        // A quarter turn counter-clockwise moves the nose to the left edge
        let turned = nose.rotated(90.0);
        for y in 0..turned.height() {
            assert!(turned.get(0, y), "left column should be solid at row {}", y);
            assert!(!turned.get(turned.width() - 1, y));
        }
    }

    #[test]
    fn test_diagonal_rotation_grows_bounding_box() {
        let car = filled(10, 10);
        let turned = car.rotated(45.0);
        assert_eq!(turned.width(), 15);
        assert_eq!(turned.height(), 15);
        // Corners of the bounding box are outside the rotated square
        assert!(!turned.get(0, 0));
        assert!(turned.get(7, 7));
    }
}
