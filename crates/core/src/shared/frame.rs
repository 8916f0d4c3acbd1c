use ndarray::{ArrayView3, ArrayViewMut3};

/// A single photo or video frame: contiguous RGBA bytes in row-major order.
///
/// Grayscale intermediates produced during sharpness analysis use the same
/// type with `channels = 1`. Format conversion happens at I/O boundaries
/// only; the pipeline treats pixel data as opaque.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Iterates over pixels as packed signed 32-bit ARGB integers,
    /// `(a << 24) | (r << 16) | (g << 8) | b`. Any fully opaque pixel packs
    /// to a negative value. Requires a 4-channel frame.
    pub fn packed_argb(&self) -> impl Iterator<Item = i32> + '_ {
        debug_assert_eq!(self.channels, 4, "packed_argb requires an RGBA frame");
        self.data.chunks_exact(4).map(|px| {
            let (r, g, b, a) = (px[0] as u32, px[1] as u32, px[2] as u32, px[3] as u32);
            ((a << 24) | (r << 16) | (g << 8) | b) as i32
        })
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
