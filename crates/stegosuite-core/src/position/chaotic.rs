use std::collections::HashSet;

/// Parameters of the Hénon map `x' = 1 - a·x² + y`, `y' = b·x`.
///
/// There is no side artifact for the chaotic scan, so unveiling only works
/// with the very same parameters that were used for hiding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HenonParams {
    pub a: f64,
    pub b: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for HenonParams {
    fn default() -> Self {
        Self {
            a: 1.4,
            b: 0.3,
            x0: 0.1,
            y0: 0.3,
        }
    }
}

/// Unique pixel positions visited by the Hénon map, in order of first visit.
///
/// The map is iterated at most `width * height` times, revisited positions
/// are skipped.
pub struct HenonPoints {
    params: HenonParams,
    x: f64,
    y: f64,
    width: u32,
    height: u32,
    attempts: usize,
    max_attempts: usize,
    seen: HashSet<(u32, u32)>,
}

impl HenonPoints {
    pub fn new(width: u32, height: u32, params: HenonParams) -> Self {
        Self {
            params,
            x: params.x0,
            y: params.y0,
            width,
            height,
            attempts: 0,
            max_attempts: width as usize * height as usize,
            seen: HashSet::new(),
        }
    }

    fn step(&mut self) -> (u32, u32) {
        let HenonParams { a, b, .. } = self.params;
        let x = 1.0 - a * self.x * self.x + self.y;
        let y = b * self.x;
        self.x = x;
        self.y = y;

        (normalize(x, self.width), normalize(y, self.height))
    }
}

/// maps a map coordinate onto `0..size` via `⌊(v + 1.5)·⌊size/3⌋⌋ mod size`
fn normalize(v: f64, size: u32) -> u32 {
    let scaled = ((v + 1.5) * f64::from(size / 3)) as i64;
    scaled.rem_euclid(i64::from(size)) as u32
}

impl Iterator for HenonPoints {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.attempts < self.max_attempts {
            self.attempts += 1;
            let p = self.step();
            if self.seen.insert(p) {
                return Some(p);
            }
        }

        None
    }
}
