use crate::column::COLUMN_HEIGHT;

/// Monochrome bitmap, `true` marks a dark (ink) pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    // layout: Y(X(pixel))
    data: Vec<Vec<bool>>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            data: vec![vec![false; width]; height],
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let data = (0..height)
            .map(|y| (0..width).map(|x| f(x, y)).collect())
            .collect();

        Self { width, data }
    }

    /// Classifies a row-major luma buffer: anything below `threshold` is dark.
    ///
    /// Rows missing from `luma` are left light.
    pub fn from_luma(width: usize, height: usize, luma: &[u8], threshold: u8) -> Self {
        Self::from_fn(width, height, |x, y| {
            luma.get(y * width + x)
                .is_some_and(|value| *value < threshold)
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        self.data[y][x] = dark;
    }

    /// The 8 pixels of column `x` inside row-band `band`, top to bottom.
    pub fn column(&self, x: usize, band: usize) -> [bool; COLUMN_HEIGHT] {
        std::array::from_fn(|i| self.data[band * COLUMN_HEIGHT + i][x])
    }

    /// Flips both axes.
    pub fn rotate180(&self) -> Self {
        let data = self
            .data
            .iter()
            .rev()
            .map(|x_lane| x_lane.iter().rev().copied().collect())
            .collect();

        Self {
            width: self.width,
            data,
        }
    }
}

/// 8-bit grayscale raster produced when unpacking a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grayscale {
    pub width: usize,
    pub height: usize,
    // layout: row-major
    pub data: Vec<u8>,
}

impl Grayscale {
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    pub fn invert(&mut self) {
        for value in &mut self.data {
            *value = !*value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_threshold_is_strict() {
        let bitmap = Bitmap::from_luma(3, 1, &[127, 128, 0], 128);

        assert!(bitmap.get(0, 0));
        assert!(!bitmap.get(1, 0));
        assert!(bitmap.get(2, 0));
    }

    #[test]
    fn rotate180_flips_both_axes() {
        let mut bitmap = Bitmap::new(4, 2);
        bitmap.set(0, 0, true);
        bitmap.set(3, 0, true);

        let rotated = bitmap.rotate180();
        assert_eq!(rotated.width(), 4);
        assert_eq!(rotated.height(), 2);
        assert!(rotated.get(3, 1));
        assert!(rotated.get(0, 1));
        assert!(!rotated.get(0, 0));
        assert!(!rotated.get(3, 0));
    }

    #[test]
    fn column_reads_one_band() {
        let bitmap = Bitmap::from_fn(2, 16, |x, y| x == 1 && y == 9);

        assert_eq!(bitmap.column(1, 0), [false; 8]);
        assert_eq!(
            bitmap.column(1, 1),
            [false, true, false, false, false, false, false, false]
        );
    }
}
