use log::warn;
use tellus_control::Control;

use crate::MapKind;

/// Linear RGBA color; alpha doubles as a roughness modifier on color maps
/// (0.5 = neutral).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Color-map fill: white albedo, neutral roughness.
    pub const ROUGHNESS_NEUTRAL: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.5);
    pub const NAN: Rgba = Rgba::new(f32::NAN, f32::NAN, f32::NAN, f32::NAN);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

fn sanitize<T: Copy>(kind: MapKind, size: u32, mut data: Vec<T>, fill: T) -> Vec<T> {
    let expect = (size * size) as usize;
    if data.len() != expect {
        warn!(
            "{} map has {} texels, expected {expect}; padding/cropping",
            kind.name(),
            data.len()
        );
        data.resize(expect, fill);
    }
    data
}

/// Heightmap texels, row-major, one f32 per vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap {
    size: u32,
    data: Vec<f32>,
}

impl HeightMap {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            data: vec![0.0; (size * size) as usize],
        }
    }

    /// Builds from raw texels, padding or cropping wrong-length input.
    pub fn from_raw(size: u32, data: Vec<f32>) -> Self {
        Self {
            size,
            data: sanitize(MapKind::Height, size, data, 0.0),
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.size + x) as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, h: f32) {
        let i = self.idx(x, y);
        self.data[i] = h;
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// (min, max) over all texels.
    pub fn min_max(&self) -> (f32, f32) {
        let mut lo = f32::MAX;
        let mut hi = f32::MIN;
        for &h in &self.data {
            lo = lo.min(h);
            hi = hi.max(h);
        }
        (lo, hi)
    }
}

/// Control-map texels, row-major, one packed u32 per vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlMap {
    size: u32,
    data: Vec<u32>,
}

impl ControlMap {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            data: vec![0; (size * size) as usize],
        }
    }

    pub fn from_raw(size: u32, data: Vec<u32>) -> Self {
        Self {
            size,
            data: sanitize(MapKind::Control, size, data, 0),
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.size + x) as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Control {
        Control(self.data[self.idx(x, y)])
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, c: Control) {
        let i = self.idx(x, y);
        self.data[i] = c.raw();
    }

    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }
}

/// Color-map texels, row-major RGBA with roughness in alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
    size: u32,
    data: Vec<Rgba>,
}

impl ColorMap {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            data: vec![Rgba::ROUGHNESS_NEUTRAL; (size * size) as usize],
        }
    }

    pub fn from_raw(size: u32, data: Vec<Rgba>) -> Self {
        Self {
            size,
            data: sanitize(MapKind::Color, size, data, Rgba::ROUGHNESS_NEUTRAL),
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.size + x) as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, c: Rgba) {
        let i = self.idx(x, y);
        self.data[i] = c;
    }

    #[inline]
    pub fn data(&self) -> &[Rgba] {
        &self.data
    }
}
