//! One terrain region tile: height, control, and color maps plus
//! bookkeeping (height range, modified/deleted flags).
#![forbid(unsafe_code)]

pub mod maps;

pub use maps::{ColorMap, ControlMap, HeightMap, Rgba};

use tellus_control::Control;

pub const DEFAULT_REGION_SIZE: u32 = 256;
pub const CURRENT_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapKind {
    Height,
    Control,
    Color,
}

impl MapKind {
    pub const fn name(self) -> &'static str {
        match self {
            MapKind::Height => "height",
            MapKind::Control => "control",
            MapKind::Color => "color",
        }
    }
}

/// A square terrain tile. All three maps are exactly `region_size²` texels
/// at all times.
#[derive(Clone, Debug)]
pub struct Region {
    location: (i32, i32),
    region_size: u32,
    version: u32,
    heights: HeightMap,
    controls: ControlMap,
    colors: ColorMap,
    height_range: (f32, f32),
    modified: bool,
    deleted: bool,
}

impl Region {
    pub fn new_blank(location: (i32, i32), region_size: u32) -> Self {
        Self {
            location,
            region_size,
            version: CURRENT_VERSION,
            heights: HeightMap::new(region_size),
            controls: ControlMap::new(region_size),
            colors: ColorMap::new(region_size),
            height_range: (0.0, 0.0),
            modified: false,
            deleted: false,
        }
    }

    /// Assembles a region from raw map data (wrong-length maps are padded
    /// or cropped) and derives the height range.
    pub fn from_maps(
        location: (i32, i32),
        region_size: u32,
        heights: Vec<f32>,
        controls: Vec<u32>,
        colors: Vec<Rgba>,
    ) -> Self {
        let mut region = Self {
            location,
            region_size,
            version: CURRENT_VERSION,
            heights: HeightMap::from_raw(region_size, heights),
            controls: ControlMap::from_raw(region_size, controls),
            colors: ColorMap::from_raw(region_size, colors),
            height_range: (0.0, 0.0),
            modified: false,
            deleted: false,
        };
        region.calc_height_range();
        region
    }

    #[inline]
    pub fn location(&self) -> (i32, i32) {
        self.location
    }

    #[inline]
    pub fn set_location(&mut self, location: (i32, i32)) {
        self.location = location;
    }

    #[inline]
    pub fn region_size(&self) -> u32 {
        self.region_size
    }

    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[inline]
    pub fn height_range(&self) -> (f32, f32) {
        self.height_range
    }

    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    #[inline]
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    #[inline]
    pub fn set_deleted(&mut self, deleted: bool) {
        self.deleted = deleted;
    }

    #[inline]
    pub fn heights(&self) -> &HeightMap {
        &self.heights
    }

    #[inline]
    pub fn controls(&self) -> &ControlMap {
        &self.controls
    }

    #[inline]
    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    /// Clamps a texel coordinate into `[0, region_size)`. Edge queries
    /// clamp, never wrap.
    #[inline]
    pub fn clamped(&self, v: i32) -> u32 {
        v.clamp(0, self.region_size as i32 - 1) as u32
    }

    #[inline]
    pub fn get_height(&self, x: u32, y: u32) -> f32 {
        self.heights.get(x, y)
    }

    pub fn set_height(&mut self, x: u32, y: u32, h: f32) {
        self.heights.set(x, y, h);
        self.update_height(h);
        self.modified = true;
    }

    #[inline]
    pub fn get_control(&self, x: u32, y: u32) -> Control {
        self.controls.get(x, y)
    }

    pub fn set_control(&mut self, x: u32, y: u32, c: Control) {
        self.controls.set(x, y, c);
        self.modified = true;
    }

    #[inline]
    pub fn get_color(&self, x: u32, y: u32) -> Rgba {
        self.colors.get(x, y)
    }

    pub fn set_color(&mut self, x: u32, y: u32, c: Rgba) {
        self.colors.set(x, y, c);
        self.modified = true;
    }

    /// Roughness modifier rides in the color alpha channel.
    #[inline]
    pub fn get_roughness(&self, x: u32, y: u32) -> f32 {
        self.colors.get(x, y).a
    }

    pub fn set_roughness(&mut self, x: u32, y: u32, roughness: f32) {
        let mut c = self.colors.get(x, y);
        c.a = roughness;
        self.set_color(x, y, c);
    }

    /// Folds one height into the cached range.
    pub fn update_height(&mut self, h: f32) {
        if h < self.height_range.0 {
            self.height_range.0 = h;
        } else if h > self.height_range.1 {
            self.height_range.1 = h;
        }
    }

    /// Full rescan of the height map.
    pub fn calc_height_range(&mut self) {
        self.height_range = self.heights.min_max();
    }
}
