use image::GrayImage;
use log::debug;

use crate::options::EdgeSearchOptions;

/// tan(22.5°) in Q15 fixed point
const TG22: i64 = 13573;

/// Canny style edge detector over a single channel.
///
/// Sobel gradients (L1 magnitude) and non-maximum suppression are computed
/// once, the hysteresis step is re-run for every threshold of a search.
/// Lowering the thresholds never removes an edge pixel, so edge counts are
/// monotonic over a descending threshold search.
pub struct EdgeMap {
    width: u32,
    height: u32,
    /// gradient magnitude after non-maximum suppression, 0 for suppressed pixels
    magnitude: Vec<i32>,
}

impl EdgeMap {
    pub fn new(channel: &GrayImage) -> Self {
        let (width, height) = channel.dimensions();
        let (w, h) = (width as i64, height as i64);
        let at = |x: i64, y: i64| -> i32 {
            let x = x.clamp(0, w - 1) as u32;
            let y = y.clamp(0, h - 1) as u32;
            i32::from(channel.get_pixel(x, y).0[0])
        };

        let len = width as usize * height as usize;
        let mut gx = vec![0i32; len];
        let mut gy = vec![0i32; len];
        let mut raw = vec![0i32; len];
        for y in 0..h {
            for x in 0..w {
                let dx = (at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2 * at(x - 1, y) + at(x - 1, y + 1));
                let dy = (at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2 * at(x, y - 1) + at(x + 1, y - 1));
                let i = (y * w + x) as usize;
                gx[i] = dx;
                gy[i] = dy;
                raw[i] = dx.abs() + dy.abs();
            }
        }

        let mag = |x: i64, y: i64| -> i32 {
            if x < 0 || y < 0 || x >= w || y >= h {
                0
            } else {
                raw[(y * w + x) as usize]
            }
        };

        let mut magnitude = vec![0i32; len];
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) as usize;
                let m = raw[i];
                if m == 0 {
                    continue;
                }
                let ax = i64::from(gx[i].abs());
                let ay = i64::from(gy[i].abs()) << 15;
                let tg22x = ax * TG22;
                let (before, after) = if ay < tg22x {
                    (mag(x - 1, y), mag(x + 1, y))
                } else if ay > tg22x + (ax << 16) {
                    (mag(x, y - 1), mag(x, y + 1))
                } else if (gx[i] < 0) != (gy[i] < 0) {
                    (mag(x + 1, y - 1), mag(x - 1, y + 1))
                } else {
                    (mag(x - 1, y - 1), mag(x + 1, y + 1))
                };
                if m > before && m >= after {
                    magnitude[i] = m;
                }
            }
        }

        Self {
            width,
            height,
            magnitude,
        }
    }

    /// Edge pixels for the hysteresis thresholds `low` and `high`, in raster order.
    ///
    /// Pixels above `high` are edges, pixels above `low` are edges when they are
    /// 8-connected to another edge pixel.
    pub fn edges(&self, low: i32, high: i32) -> Vec<(u32, u32)> {
        let (w, h) = (self.width as i64, self.height as i64);
        let mut mask = vec![false; self.magnitude.len()];
        let mut stack: Vec<usize> = self
            .magnitude
            .iter()
            .enumerate()
            .filter(|(_, m)| **m > high)
            .map(|(i, _)| i)
            .collect();
        for i in &stack {
            mask[*i] = true;
        }

        while let Some(i) = stack.pop() {
            let (x, y) = ((i as i64) % w, (i as i64) / w);
            for (dx, dy) in NEIGHBOURS {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    continue;
                }
                let n = (ny * w + nx) as usize;
                if !mask[n] && self.magnitude[n] > low {
                    mask[n] = true;
                    stack.push(n);
                }
            }
        }

        mask.iter()
            .enumerate()
            .filter(|(_, edge)| **edge)
            .map(|(i, _)| ((i as i64 % w) as u32, (i as i64 / w) as u32))
            .collect()
    }

    /// edges at a threshold given in percent of the full 8 bit range
    pub fn edges_at_percent(&self, percent: u32) -> Vec<(u32, u32)> {
        let low = threshold_for_percent(percent);
        self.edges(low, low * 2)
    }

    /// Descending threshold search for the first edge set with at least `needed` pixels.
    pub fn search_at_least(
        &self,
        needed: usize,
        options: &EdgeSearchOptions,
    ) -> Option<Vec<(u32, u32)>> {
        self.search(options, |count| count >= needed)
    }

    /// Descending threshold search for the first edge set with exactly `count` pixels.
    pub fn search_exact(
        &self,
        count: usize,
        options: &EdgeSearchOptions,
    ) -> Option<Vec<(u32, u32)>> {
        self.search(options, |found| found == count)
    }

    fn search<F: Fn(usize) -> bool>(
        &self,
        options: &EdgeSearchOptions,
        accept: F,
    ) -> Option<Vec<(u32, u32)>> {
        for percent in options.percents() {
            let edges = self.edges_at_percent(percent);
            debug!("edge threshold {percent}% yields {} edge pixels", edges.len());
            if accept(edges.len()) {
                return Some(edges);
            }
        }

        None
    }
}

/// `percent` of 255, truncated
pub fn threshold_for_percent(percent: u32) -> i32 {
    (percent * 255 / 100) as i32
}

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
