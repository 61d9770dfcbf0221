//! World-space texel queries. Positions are descaled by vertex spacing and
//! clamped into the containing region; reads outside any region return the
//! NaN sentinel (or None for control words).

use log::warn;
use tellus_control::Control;
use tellus_geom::Vec3;
use tellus_region::Rgba;

use crate::TerrainData;
use crate::util::{bilerp, round_multiple};

impl TerrainData {
    /// Height of the texel containing `pos`, no interpolation.
    pub fn get_height_nearest(&self, pos: Vec3) -> f32 {
        match self.texel(pos) {
            Some((loc, x, y)) => self.get_region(loc).map_or(f32::NAN, |r| r.get_height(x, y)),
            None => f32::NAN,
        }
    }

    pub fn set_height(&mut self, pos: Vec3, h: f32) {
        let Some((loc, x, y)) = self.texel(pos) else {
            warn!("no region at {pos:?}");
            return;
        };
        if let Some(region) = self.get_region_mut(loc) {
            region.set_height(x, y, h);
        }
        self.update_master_height(h);
    }

    pub fn get_control(&self, pos: Vec3) -> Option<Control> {
        let (loc, x, y) = self.texel(pos)?;
        self.get_region(loc).map(|r| r.get_control(x, y))
    }

    pub fn set_control(&mut self, pos: Vec3, c: Control) {
        let Some((loc, x, y)) = self.texel(pos) else {
            warn!("no region at {pos:?}");
            return;
        };
        if let Some(region) = self.get_region_mut(loc) {
            region.set_control(x, y, c);
        }
    }

    pub fn get_color(&self, pos: Vec3) -> Rgba {
        match self.texel(pos) {
            Some((loc, x, y)) => self.get_region(loc).map_or(Rgba::NAN, |r| r.get_color(x, y)),
            None => Rgba::NAN,
        }
    }

    pub fn set_color(&mut self, pos: Vec3, color: Rgba) {
        let Some((loc, x, y)) = self.texel(pos) else {
            warn!("no region at {pos:?}");
            return;
        };
        if let Some(region) = self.get_region_mut(loc) {
            region.set_color(x, y, color);
        }
    }

    pub fn get_roughness(&self, pos: Vec3) -> f32 {
        self.get_color(pos).a
    }

    pub fn set_roughness(&mut self, pos: Vec3, roughness: f32) {
        let Some((loc, x, y)) = self.texel(pos) else {
            warn!("no region at {pos:?}");
            return;
        };
        if let Some(region) = self.get_region_mut(loc) {
            region.set_roughness(x, y, roughness);
        }
    }

    /// Rewrites the control word at `pos` through `f`. No-op outside
    /// loaded regions.
    pub fn map_control(&mut self, pos: Vec3, f: impl FnOnce(Control) -> Control) {
        let Some((loc, x, y)) = self.texel(pos) else {
            warn!("no region at {pos:?}");
            return;
        };
        if let Some(region) = self.get_region_mut(loc) {
            let c = region.get_control(x, y);
            region.set_control(x, y, f(c));
        }
    }

    pub fn get_control_base(&self, pos: Vec3) -> Option<u8> {
        self.get_control(pos).map(|c| c.base())
    }

    pub fn set_control_base(&mut self, pos: Vec3, id: u8) {
        self.map_control(pos, |c| c.with_base(id));
    }

    pub fn get_control_overlay(&self, pos: Vec3) -> Option<u8> {
        self.get_control(pos).map(|c| c.overlay())
    }

    pub fn set_control_overlay(&mut self, pos: Vec3, id: u8) {
        self.map_control(pos, |c| c.with_overlay(id));
    }

    /// Blend as 0..=1.
    pub fn get_control_blend(&self, pos: Vec3) -> Option<f32> {
        self.get_control(pos).map(|c| c.blend_unit())
    }

    pub fn set_control_blend(&mut self, pos: Vec3, blend: f32) {
        let quantized = (blend.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.map_control(pos, |c| c.with_blend(quantized));
    }

    pub fn get_control_hole(&self, pos: Vec3) -> bool {
        self.get_control(pos).is_some_and(|c| c.is_hole())
    }

    pub fn set_control_hole(&mut self, pos: Vec3, hole: bool) {
        self.map_control(pos, |c| c.with_hole(hole));
    }

    pub fn get_control_navigation(&self, pos: Vec3) -> bool {
        self.get_control(pos).is_some_and(|c| c.is_nav())
    }

    pub fn set_control_navigation(&mut self, pos: Vec3, nav: bool) {
        self.map_control(pos, |c| c.with_nav(nav));
    }

    pub fn get_control_auto(&self, pos: Vec3) -> bool {
        self.get_control(pos).is_some_and(|c| c.is_auto())
    }

    pub fn set_control_auto(&mut self, pos: Vec3, auto: bool) {
        self.map_control(pos, |c| c.with_auto(auto));
    }

    /// UV rotation at `pos` in degrees; NaN outside regions.
    pub fn get_uv_angle_degrees(&self, pos: Vec3) -> f32 {
        self.get_control(pos)
            .map_or(f32::NAN, |c| c.uv_angle_degrees())
    }

    /// UV scale modifier at `pos` in percent; NaN outside regions.
    pub fn get_uv_scale_percent(&self, pos: Vec3) -> f32 {
        self.get_control(pos)
            .map_or(f32::NAN, |c| c.uv_scale_percent())
    }

    /// Interpolated terrain height. NaN in holes and outside regions.
    /// Positions within 0.01 of a vertex return that vertex's height;
    /// everything else bilinearly interpolates the 4 surrounding vertices.
    pub fn get_height(&self, pos: Vec3) -> f32 {
        if self.get_control(pos).is_some_and(|c| c.is_hole()) {
            return f32::NAN;
        }
        let step = self.vertex_spacing();
        let x_round = round_multiple(pos.x, step);
        let z_round = round_multiple(pos.z, step);
        let dx = pos.x - x_round;
        let dz = pos.z - z_round;
        if (dx * dx + dz * dz).sqrt() < 0.01 {
            return self.get_height_nearest(Vec3::new(x_round, 0.0, z_round));
        }
        let x00 = (pos.x / step).floor() * step;
        let z00 = (pos.z / step).floor() * step;
        let ht00 = self.get_height_nearest(Vec3::new(x00, 0.0, z00));
        let ht01 = self.get_height_nearest(Vec3::new(x00, 0.0, z00 + step));
        let ht10 = self.get_height_nearest(Vec3::new(x00 + step, 0.0, z00));
        let ht11 = self.get_height_nearest(Vec3::new(x00 + step, 0.0, z00 + step));
        bilerp(
            ht00,
            ht01,
            ht10,
            ht11,
            (x00, z00),
            (x00 + step, z00 + step),
            (pos.x, pos.z),
        )
    }

    /// Surface normal from forward height differences; NaN-vector outside
    /// regions and in holes.
    pub fn get_normal(&self, pos: Vec3) -> Vec3 {
        if !self.has_region_at(pos) || self.get_control(pos).is_some_and(|c| c.is_hole()) {
            return Vec3::NAN;
        }
        let spacing = self.vertex_spacing();
        let height = self.get_height(pos);
        let u = height - self.get_height(pos + Vec3::new(spacing, 0.0, 0.0));
        let v = height - self.get_height(pos + Vec3::new(0.0, 0.0, spacing));
        Vec3::new(u, spacing, v).normalized()
    }

    /// (base id, overlay id, blend 0..=1) at `pos`; None outside regions
    /// and in holes. Blend interpretation is up to the consumer; the
    /// overlay texture typically reads as visible from roughly 0.3 up.
    pub fn get_texture_blend(&self, pos: Vec3) -> Option<(u8, u8, f32)> {
        let c = self.get_control(pos)?;
        if c.is_hole() {
            return None;
        }
        Some((c.base(), c.overlay(), c.blend_unit()))
    }

    /// Whether the surface slope at `pos` falls inside `(min_deg, max_deg)`
    /// (degrees from horizontal). `invert` selects the complement. False
    /// outside regions and in holes.
    pub fn is_in_slope(&self, pos: Vec3, (min_deg, max_deg): (f32, f32), invert: bool) -> bool {
        let normal = self.get_normal(pos);
        if !normal.is_finite() {
            return false;
        }
        let slope = normal.dot(Vec3::UP).clamp(-1.0, 1.0).acos().to_degrees();
        let in_range = slope >= min_deg && slope <= max_deg;
        in_range != invert
    }
}
