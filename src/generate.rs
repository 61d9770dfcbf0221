use std::error::Error;
use std::path::Path;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use log::info;
use tellus_control::Control;
use tellus_data::{DEFAULT_VERTEX_SPACING, TerrainData};
use tellus_geom::Vec3;

/// Builds a square block of regions from layered OpenSimplex noise and
/// saves them to `out`.
pub fn generate(
    out: &Path,
    seed: i32,
    regions_per_axis: u32,
    region_size: u32,
    amplitude: f32,
) -> Result<(), Box<dyn Error>> {
    let mut data = TerrainData::new(region_size, DEFAULT_VERTEX_SPACING);

    // Broad relief plus a higher-frequency detail layer
    let mut relief = FastNoiseLite::with_seed(seed);
    relief.set_noise_type(Some(NoiseType::OpenSimplex2));
    relief.set_frequency(Some(0.004));
    let mut detail = FastNoiseLite::with_seed(seed.wrapping_add(1));
    detail.set_noise_type(Some(NoiseType::OpenSimplex2));
    detail.set_frequency(Some(0.02));

    let span = regions_per_axis * region_size;
    info!("generating {span}x{span} heights (seed {seed}, amplitude {amplitude})");
    let mut heights = Vec::with_capacity((span as usize) * (span as usize));
    for z in 0..span {
        for x in 0..span {
            let h = relief.get_noise_2d(x as f32, z as f32)
                + 0.15 * detail.get_noise_2d(x as f32, z as f32);
            heights.push(h);
        }
    }
    data.import_heights(Vec3::ZERO, span, span, &heights, 0.0, amplitude)?;

    // Freshly generated terrain is textured by the autoshader.
    let auto = Control(0).with_auto(true);
    let locations = data.locations().to_vec();
    for loc in locations {
        if let Some(region) = data.get_region_mut(loc) {
            for y in 0..region_size {
                for x in 0..region_size {
                    region.set_control(x, y, auto);
                }
            }
        }
    }

    data.calc_height_range(false);
    let (lo, hi) = data.height_range();
    info!(
        "generated {} regions, height range {lo:.2}..{hi:.2}",
        data.region_count()
    );
    tellus_io::save_directory(&mut data, out)
}
