//! Bulk height transfer in and out of the region grid.

use std::error::Error;

use log::{debug, warn};
use tellus_geom::Vec3;

use crate::TerrainData;

impl TerrainData {
    /// Writes a `width` x `depth` row-major height grid into the store,
    /// anchored at `origin` (its -X/-Z corner). Each sample becomes
    /// `v * scale + offset`. Blank regions are created on demand; samples
    /// landing outside the world grid are skipped and counted.
    pub fn import_heights(
        &mut self,
        origin: Vec3,
        width: u32,
        depth: u32,
        data: &[f32],
        offset: f32,
        scale: f32,
    ) -> Result<(), Box<dyn Error>> {
        let expect = (width as usize) * (depth as usize);
        if data.len() != expect {
            return Err(format!(
                "height grid is {} samples, expected {width}x{depth} = {expect}",
                data.len()
            )
            .into());
        }
        debug!("importing {width}x{depth} heights at {origin:?}");
        let spacing = self.vertex_spacing();
        let mut skipped = 0usize;
        for j in 0..depth {
            for i in 0..width {
                let pos = origin + Vec3::new(i as f32 * spacing, 0.0, j as f32 * spacing);
                let loc = self.region_location(pos);
                if Self::region_map_index(loc).is_none() {
                    skipped += 1;
                    continue;
                }
                if !self.has_region(loc) {
                    self.add_region_blank(loc)?;
                }
                let h = data[(j * width + i) as usize] * scale + offset;
                self.set_height(pos, h);
            }
        }
        if skipped > 0 {
            warn!("import skipped {skipped} samples outside the world grid");
        }
        Ok(())
    }

    /// Stitches all active regions into one row-major grid. Returns the
    /// grid origin (world units) plus its dimensions; slots with no region
    /// are NaN-filled. None when the store is empty.
    pub fn export_heights(&self) -> Option<(Vec3, u32, u32, Vec<f32>)> {
        let locations = self.locations();
        if locations.is_empty() {
            return None;
        }
        let min_x = locations.iter().map(|l| l.0).min()?;
        let max_x = locations.iter().map(|l| l.0).max()?;
        let min_z = locations.iter().map(|l| l.1).min()?;
        let max_z = locations.iter().map(|l| l.1).max()?;

        let size = self.region_size();
        let width = (max_x - min_x + 1) as u32 * size;
        let depth = (max_z - min_z + 1) as u32 * size;
        let mut grid = vec![f32::NAN; (width as usize) * (depth as usize)];

        for loc in locations {
            let Some(region) = self.get_region(*loc) else {
                continue;
            };
            let base_x = (loc.0 - min_x) as u32 * size;
            let base_z = (loc.1 - min_z) as u32 * size;
            for y in 0..size {
                for x in 0..size {
                    let idx = ((base_z + y) * width + base_x + x) as usize;
                    grid[idx] = region.get_height(x, y);
                }
            }
        }

        let spacing = self.vertex_spacing();
        let origin = Vec3::new(
            min_x as f32 * size as f32 * spacing,
            0.0,
            min_z as f32 * size as f32 * spacing,
        );
        Some((origin, width, depth, grid))
    }
}
