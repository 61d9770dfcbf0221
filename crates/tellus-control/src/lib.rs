//! Packed control-texel codec for terrain control maps.
#![forbid(unsafe_code)]

/// One control-map texel, packed into a u32.
///
/// Bit layout (LSB = 0, matches the on-disk control map format):
///   [0]      autoshader flag
///   [1]      navigation flag
///   [2]      hole flag
///   [6:8]    uv scale index (3-bit)
///   [10:13]  uv angle index (4-bit)
///   [14:21]  texture blend (8-bit)
///   [22:26]  overlay texture id (5-bit)
///   [27:31]  base texture id (5-bit)
///
/// Bits 3-5 and 9 are reserved and preserved as-is by every setter.
/// Setters mask their argument to the field width, so out-of-range
/// values are truncated rather than rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Control(pub u32);

const BASE_SHIFT: u32 = 27;
const OVERLAY_SHIFT: u32 = 22;
const BLEND_SHIFT: u32 = 14;
const ANGLE_SHIFT: u32 = 10;
const SCALE_SHIFT: u32 = 6;
const HOLE_SHIFT: u32 = 2;
const NAV_SHIFT: u32 = 1;

const TEXTURE_MASK: u32 = 0x1F;
const BLEND_MASK: u32 = 0xFF;
const ANGLE_MASK: u32 = 0xF;
const SCALE_MASK: u32 = 0x7;

/// UV rotation steps, degrees per angle index.
pub const ANGLE_STEP_DEGREES: f32 = 22.5;

/// UV scale modifier per scale index, in percent.
pub const SCALE_PERCENT: [f32; 8] = [0.0, 20.0, 40.0, 60.0, 80.0, -60.0, -40.0, -20.0];

impl Control {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Reinterprets a 32-bit float channel as a control word. Control maps
    /// are stored in float image channels; the bits are the payload, the
    /// float value is meaningless.
    #[inline]
    pub const fn from_f32_bits(v: f32) -> Self {
        Self(v.to_bits())
    }

    #[inline]
    pub const fn to_f32_bits(self) -> f32 {
        f32::from_bits(self.0)
    }

    #[inline]
    pub const fn base(self) -> u8 {
        (self.0 >> BASE_SHIFT & TEXTURE_MASK) as u8
    }

    #[inline]
    pub const fn with_base(self, id: u8) -> Self {
        Self(self.0 & !(TEXTURE_MASK << BASE_SHIFT) | (id as u32 & TEXTURE_MASK) << BASE_SHIFT)
    }

    #[inline]
    pub const fn overlay(self) -> u8 {
        (self.0 >> OVERLAY_SHIFT & TEXTURE_MASK) as u8
    }

    #[inline]
    pub const fn with_overlay(self, id: u8) -> Self {
        Self(self.0 & !(TEXTURE_MASK << OVERLAY_SHIFT) | (id as u32 & TEXTURE_MASK) << OVERLAY_SHIFT)
    }

    #[inline]
    pub const fn blend(self) -> u8 {
        (self.0 >> BLEND_SHIFT & BLEND_MASK) as u8
    }

    #[inline]
    pub const fn with_blend(self, blend: u8) -> Self {
        Self(self.0 & !(BLEND_MASK << BLEND_SHIFT) | (blend as u32) << BLEND_SHIFT)
    }

    /// Blend as 0..=1, base texture at 0, overlay at 1.
    #[inline]
    pub fn blend_unit(self) -> f32 {
        self.blend() as f32 / 255.0
    }

    #[inline]
    pub const fn uv_angle(self) -> u8 {
        (self.0 >> ANGLE_SHIFT & ANGLE_MASK) as u8
    }

    #[inline]
    pub const fn with_uv_angle(self, index: u8) -> Self {
        Self(self.0 & !(ANGLE_MASK << ANGLE_SHIFT) | (index as u32 & ANGLE_MASK) << ANGLE_SHIFT)
    }

    /// UV rotation in degrees, 16 steps of 22.5.
    #[inline]
    pub fn uv_angle_degrees(self) -> f32 {
        self.uv_angle() as f32 * ANGLE_STEP_DEGREES
    }

    #[inline]
    pub const fn uv_scale(self) -> u8 {
        (self.0 >> SCALE_SHIFT & SCALE_MASK) as u8
    }

    #[inline]
    pub const fn with_uv_scale(self, index: u8) -> Self {
        Self(self.0 & !(SCALE_MASK << SCALE_SHIFT) | (index as u32 & SCALE_MASK) << SCALE_SHIFT)
    }

    /// UV scale modifier in percent, from the fixed lookup.
    #[inline]
    pub fn uv_scale_percent(self) -> f32 {
        SCALE_PERCENT[self.uv_scale() as usize]
    }

    #[inline]
    pub const fn is_hole(self) -> bool {
        self.0 >> HOLE_SHIFT & 0x1 == 1
    }

    #[inline]
    pub const fn with_hole(self, hole: bool) -> Self {
        Self(self.0 & !(0x1 << HOLE_SHIFT) | (hole as u32) << HOLE_SHIFT)
    }

    #[inline]
    pub const fn is_nav(self) -> bool {
        self.0 >> NAV_SHIFT & 0x1 == 1
    }

    #[inline]
    pub const fn with_nav(self, nav: bool) -> Self {
        Self(self.0 & !(0x1 << NAV_SHIFT) | (nav as u32) << NAV_SHIFT)
    }

    #[inline]
    pub const fn is_auto(self) -> bool {
        self.0 & 0x1 == 1
    }

    #[inline]
    pub const fn with_auto(self, auto: bool) -> Self {
        Self(self.0 & !0x1 | auto as u32)
    }
}

impl From<u32> for Control {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<Control> for u32 {
    #[inline]
    fn from(c: Control) -> u32 {
        c.0
    }
}
