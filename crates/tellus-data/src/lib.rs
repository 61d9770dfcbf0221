//! Region grid and world-space terrain queries.
#![forbid(unsafe_code)]

pub mod query;
pub mod transfer;
pub mod util;

use std::error::Error;

use hashbrown::HashMap;
use log::{debug, info};
use tellus_geom::{Aabb, Vec3};
use tellus_region::Region;

/// The world is a fixed grid of region slots, `REGION_MAP_SIZE` per axis.
/// Valid region locations are `[-16, 16)` on each axis.
pub const REGION_MAP_SIZE: i32 = 32;

pub const DEFAULT_VERTEX_SPACING: f32 = 1.0;

/// All loaded regions plus the indices derived from them.
///
/// Regions are dual indexed: by location (the stable key) and by a
/// transient 1-based region id stored in `region_map`. Ids are rebuilt on
/// every add/remove and depend on insertion order; only locations are
/// durable.
pub struct TerrainData {
    region_size: u32,
    vertex_spacing: f32,
    regions: HashMap<(i32, i32), Region>,
    locations: Vec<(i32, i32)>,
    region_map: Vec<u16>,
    height_range: (f32, f32),
    edited_area: Option<Aabb>,
}

impl TerrainData {
    pub fn new(region_size: u32, vertex_spacing: f32) -> Self {
        Self {
            region_size,
            vertex_spacing,
            regions: HashMap::new(),
            locations: Vec::new(),
            region_map: vec![0; (REGION_MAP_SIZE * REGION_MAP_SIZE) as usize],
            height_range: (0.0, 0.0),
            edited_area: None,
        }
    }

    #[inline]
    pub fn region_size(&self) -> u32 {
        self.region_size
    }

    #[inline]
    pub fn vertex_spacing(&self) -> f32 {
        self.vertex_spacing
    }

    /// Region location containing a global position. Pure math, no bounds
    /// check, no data access.
    #[inline]
    pub fn region_location(&self, pos: Vec3) -> (i32, i32) {
        let span = self.vertex_spacing * self.region_size as f32;
        ((pos.x / span).floor() as i32, (pos.z / span).floor() as i32)
    }

    /// Index into `region_map` for a location, or None if outside the
    /// world grid. Offsets to positive coordinates, then any bit beyond
    /// 0x1F means out of bounds.
    #[inline]
    pub fn region_map_index(loc: (i32, i32)) -> Option<usize> {
        let x = loc.0 + REGION_MAP_SIZE / 2;
        let y = loc.1 + REGION_MAP_SIZE / 2;
        if (x | y) as u32 & !0x1Fu32 != 0 {
            return None;
        }
        Some((y * REGION_MAP_SIZE + x) as usize)
    }

    #[inline]
    pub fn region_count(&self) -> usize {
        self.locations.len()
    }

    /// Active locations in id order (id = index + 1).
    #[inline]
    pub fn locations(&self) -> &[(i32, i32)] {
        &self.locations
    }

    /// The 32x32 grid of region ids; 0 = no region.
    #[inline]
    pub fn region_map(&self) -> &[u16] {
        &self.region_map
    }

    #[inline]
    pub fn has_region(&self, loc: (i32, i32)) -> bool {
        self.regions.contains_key(&loc)
    }

    #[inline]
    pub fn has_region_at(&self, pos: Vec3) -> bool {
        self.has_region(self.region_location(pos))
    }

    #[inline]
    pub fn get_region(&self, loc: (i32, i32)) -> Option<&Region> {
        self.regions.get(&loc)
    }

    #[inline]
    pub fn get_region_mut(&mut self, loc: (i32, i32)) -> Option<&mut Region> {
        self.regions.get_mut(&loc)
    }

    #[inline]
    pub fn get_region_at(&self, pos: Vec3) -> Option<&Region> {
        self.get_region(self.region_location(pos))
    }

    /// Installs a region. The location must be inside the world grid and
    /// the maps must match the store's region size.
    pub fn add_region(&mut self, region: Region) -> Result<(), Box<dyn Error>> {
        let loc = region.location();
        if Self::region_map_index(loc).is_none() {
            return Err(format!("region location {loc:?} is outside the world grid").into());
        }
        if region.region_size() != self.region_size {
            return Err(format!(
                "region size {} does not match store size {}",
                region.region_size(),
                self.region_size
            )
            .into());
        }
        debug!("storing region {loc:?} version {}", region.version());
        self.update_master_heights(region.height_range());
        self.regions.insert(loc, region);
        self.update_region_map();
        Ok(())
    }

    /// Creates and installs a blank region, returning its location slot.
    pub fn add_region_blank(&mut self, loc: (i32, i32)) -> Result<(), Box<dyn Error>> {
        self.add_region(Region::new_blank(loc, self.region_size))
    }

    pub fn remove_region(&mut self, loc: (i32, i32)) -> Option<Region> {
        let removed = self.regions.remove(&loc);
        if removed.is_some() {
            self.update_region_map();
        }
        removed
    }

    pub fn set_region_modified(&mut self, loc: (i32, i32), modified: bool) {
        if let Some(region) = self.regions.get_mut(&loc) {
            region.set_modified(modified);
        }
    }

    pub fn is_region_modified(&self, loc: (i32, i32)) -> bool {
        self.regions.get(&loc).is_some_and(|r| r.is_modified())
    }

    pub fn set_region_deleted(&mut self, loc: (i32, i32), deleted: bool) {
        if let Some(region) = self.regions.get_mut(&loc) {
            region.set_deleted(deleted);
        }
    }

    pub fn is_region_deleted(&self, loc: (i32, i32)) -> bool {
        self.regions.get(&loc).is_some_and(|r| r.is_deleted())
    }

    /// Rebuilds the location list and id grid. Ids are assigned in sorted
    /// location order so rebuilds are deterministic.
    pub fn update_region_map(&mut self) {
        self.locations = self.regions.keys().copied().collect();
        self.locations.sort_unstable();
        self.region_map.fill(0);
        for (i, loc) in self.locations.iter().enumerate() {
            // Locations were bounds-checked on insert.
            if let Some(idx) = Self::region_map_index(*loc) {
                self.region_map[idx] = i as u16 + 1;
            }
        }
    }

    #[inline]
    pub fn height_range(&self) -> (f32, f32) {
        self.height_range
    }

    /// Folds one height into the master range.
    pub fn update_master_height(&mut self, h: f32) {
        if h < self.height_range.0 {
            self.height_range.0 = h;
        } else if h > self.height_range.1 {
            self.height_range.1 = h;
        }
    }

    /// Folds a (low, high) pair into the master range.
    pub fn update_master_heights(&mut self, (lo, hi): (f32, f32)) {
        if lo < self.height_range.0 {
            self.height_range.0 = lo;
        }
        if hi > self.height_range.1 {
            self.height_range.1 = hi;
        }
    }

    /// Recomputes the master range from region ranges; `rescan` rescans
    /// each region's height map first.
    pub fn calc_height_range(&mut self, rescan: bool) {
        if rescan {
            for region in self.regions.values_mut() {
                region.calc_height_range();
            }
        }
        self.height_range = (0.0, 0.0);
        let ranges: Vec<(f32, f32)> = self.regions.values().map(|r| r.height_range()).collect();
        for range in ranges {
            self.update_master_heights(range);
        }
        info!(
            "master height range: {:.2}..{:.2}",
            self.height_range.0, self.height_range.1
        );
    }

    #[inline]
    pub fn edited_area(&self) -> Option<Aabb> {
        self.edited_area
    }

    pub fn add_edited_area(&mut self, area: Aabb) {
        self.edited_area = Some(match self.edited_area {
            Some(existing) => existing.merge(area),
            None => area,
        });
    }

    pub fn clear_edited_area(&mut self) {
        self.edited_area = None;
    }

    /// Region-local texel address for a global position, or None when no
    /// region is loaded there. Coordinates clamp to the region edge.
    pub(crate) fn texel(&self, pos: Vec3) -> Option<((i32, i32), u32, u32)> {
        let loc = self.region_location(pos);
        let region = self.regions.get(&loc)?;
        let lx = (pos.x / self.vertex_spacing - (loc.0 * self.region_size as i32) as f32) as i32;
        let lz = (pos.z / self.vertex_spacing - (loc.1 * self.region_size as i32) as f32) as i32;
        Some((loc, region.clamped(lx), region.clamped(lz)))
    }
}
