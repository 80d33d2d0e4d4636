//! RGB frame buffer.
//!
//! Pixels are `0x00RRGGBB` values stored row-major with no padding.

/// A resizable 32-bit-per-pixel raster.
///
/// # Examples
///
/// ```
/// use electron_emu::Image;
///
/// let mut image = Image::new(2, 1);
/// image.set(1, 0, 0xFF0000);
///
/// let big = image.upscale(2, 2);
/// assert_eq!((big.width(), big.height()), (4, 2));
/// assert_eq!(big.get(3, 1), 0xFF0000);
/// assert_eq!(big.get(1, 1), 0x000000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Image {
    /// Creates a black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Changes the dimensions. The buffer is only reallocated when they differ.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height, 0);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        self.pixels[y * self.width + x]
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    pub fn set(&mut self, x: usize, y: usize, rgb: u32) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        self.pixels[y * self.width + x] = rgb;
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * std::mem::size_of::<u32>()
    }

    /// Returns a copy scaled by whole factors, each pixel becoming an
    /// `nx` by `ny` block.
    pub fn upscale(&self, nx: usize, ny: usize) -> Image {
        let mut result = Image::new(self.width * nx, self.height * ny);

        for (y, row) in self.pixels.chunks(self.width.max(1)).enumerate() {
            let scaled: Vec<u32> = row
                .iter()
                .flat_map(|&pixel| std::iter::repeat(pixel).take(nx))
                .collect();
            for iy in 0..ny {
                let start = (y * ny + iy) * result.width;
                result.pixels[start..start + scaled.len()].copy_from_slice(&scaled);
            }
        }

        result
    }

    /// Converts to tightly packed RGBA bytes with opaque alpha, the layout
    /// canvas `ImageData` expects.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&rgb| {
                let [_, r, g, b] = rgb.to_be_bytes();
                [r, g, b, 0xFF]
            })
            .collect()
    }
}
