/// Row major pixel order, `y` outer and `x` inner.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    len: usize,
    i: usize,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            len: width as usize * height as usize,
            i: 0,
        }
    }

    /// position of the `index`-th pixel, without iterating
    pub fn position(width: u32, index: usize) -> (u32, u32) {
        let width = width as usize;
        ((index % width) as u32, (index / width) as u32)
    }
}

impl Iterator for Raster {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.len {
            return None;
        }
        let p = Self::position(self.width, self.i);
        self.i += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len - self.i;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Raster {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_iterate_rows_first() {
        let order: Vec<_> = Raster::new(3, 2).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn should_be_restartable_by_index() {
        for (i, p) in Raster::new(7, 5).enumerate() {
            assert_eq!(Raster::position(7, i), p);
        }
        assert_eq!(Raster::new(7, 5).len(), 35);
        assert_eq!(Raster::new(0, 5).next(), None);
    }
}
