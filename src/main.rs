use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{error, info};
use tellus_assets::AssetCatalog;
use tellus_data::{DEFAULT_VERTEX_SPACING, TerrainData};
use tellus_geom::Vec3;

mod generate;

#[derive(Parser)]
#[command(name = "tellus", about = "Terrain region data toolkit", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a block of noise terrain and save it
    Generate {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: i32,
        /// Regions per axis (the block is square)
        #[arg(long, default_value_t = 2)]
        regions: u32,
        #[arg(long, default_value_t = tellus_region::DEFAULT_REGION_SIZE)]
        region_size: u32,
        #[arg(long, default_value_t = 30.0)]
        amplitude: f32,
    },
    /// Load a terrain directory and print its region table
    Audit {
        dir: PathBuf,
        #[arg(long, default_value_t = tellus_region::DEFAULT_REGION_SIZE)]
        region_size: u32,
    },
    /// Report height, normal, and texturing at a world position
    Sample {
        dir: PathBuf,
        x: f32,
        z: f32,
        #[arg(long, default_value_t = tellus_region::DEFAULT_REGION_SIZE)]
        region_size: u32,
    },
    /// Set control-map texture fields at a world position and save
    Paint {
        dir: PathBuf,
        x: f32,
        z: f32,
        /// Base texture: numeric id, or a name from --assets
        #[arg(long)]
        base: Option<String>,
        /// Overlay texture: numeric id, or a name from --assets
        #[arg(long)]
        overlay: Option<String>,
        /// Blend between base and overlay, 0..=1
        #[arg(long)]
        blend: Option<f32>,
        /// Texture catalog TOML for resolving names
        #[arg(long)]
        assets: Option<PathBuf>,
        #[arg(long, default_value_t = tellus_region::DEFAULT_REGION_SIZE)]
        region_size: u32,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Generate {
            out,
            seed,
            regions,
            region_size,
            amplitude,
        } => generate::generate(&out, seed, regions, region_size, amplitude),
        Command::Audit { dir, region_size } => audit(&dir, region_size),
        Command::Sample {
            dir,
            x,
            z,
            region_size,
        } => sample(&dir, x, z, region_size),
        Command::Paint {
            dir,
            x,
            z,
            base,
            overlay,
            blend,
            assets,
            region_size,
        } => paint(&dir, x, z, base, overlay, blend, assets, region_size),
    }
}

fn load(dir: &Path, region_size: u32) -> Result<TerrainData, Box<dyn Error>> {
    let mut data = TerrainData::new(region_size, DEFAULT_VERTEX_SPACING);
    tellus_io::load_directory(&mut data, dir)?;
    Ok(data)
}

fn audit(dir: &Path, region_size: u32) -> Result<(), Box<dyn Error>> {
    let data = load(dir, region_size)?;
    info!("regions: {}", data.region_count());
    for loc in data.locations() {
        let Some(region) = data.get_region(*loc) else {
            continue;
        };
        let (lo, hi) = region.height_range();
        info!(
            "  {:>10} size {} heights {lo:.2}..{hi:.2}{}",
            format!("{loc:?}"),
            region.region_size(),
            if region.is_modified() { " (modified)" } else { "" }
        );
    }
    let (lo, hi) = data.height_range();
    info!("master height range: {lo:.2}..{hi:.2}");
    let texels = data.region_count() as u64 * (region_size as u64).pow(2);
    info!("texels per map: {texels}");
    Ok(())
}

fn sample(dir: &Path, x: f32, z: f32, region_size: u32) -> Result<(), Box<dyn Error>> {
    let data = load(dir, region_size)?;
    let pos = Vec3::new(x, 0.0, z);
    if !data.has_region_at(pos) {
        return Err(format!("no region at ({x}, {z})").into());
    }
    info!("height: {:.3}", data.get_height(pos));
    let n = data.get_normal(pos);
    info!("normal: ({:.3}, {:.3}, {:.3})", n.x, n.y, n.z);
    match data.get_texture_blend(pos) {
        Some((base, overlay, blend)) => {
            info!("textures: base {base}, overlay {overlay}, blend {blend:.2}")
        }
        None => info!("textures: none (hole)"),
    }
    if let Some(c) = data.get_control(pos) {
        info!(
            "flags: auto={} nav={} hole={}; uv angle {:.1} deg, uv scale {:.0}%",
            c.is_auto(),
            c.is_nav(),
            c.is_hole(),
            c.uv_angle_degrees(),
            c.uv_scale_percent()
        );
    }
    Ok(())
}

fn resolve_texture(arg: &str, catalog: Option<&AssetCatalog>) -> Result<u8, Box<dyn Error>> {
    if let Ok(id) = arg.parse::<u8>() {
        return Ok(id);
    }
    let catalog = catalog.ok_or("texture names need --assets <catalog.toml>")?;
    let id = catalog
        .get_id(arg)
        .ok_or_else(|| format!("texture '{arg}' not in catalog"))?;
    Ok(id as u8)
}

fn paint(
    dir: &Path,
    x: f32,
    z: f32,
    base: Option<String>,
    overlay: Option<String>,
    blend: Option<f32>,
    assets: Option<PathBuf>,
    region_size: u32,
) -> Result<(), Box<dyn Error>> {
    let catalog = match assets {
        Some(path) => Some(AssetCatalog::from_path(path)?),
        None => None,
    };
    let mut data = load(dir, region_size)?;
    let pos = Vec3::new(x, 0.0, z);
    if !data.has_region_at(pos) {
        return Err(format!("no region at ({x}, {z})").into());
    }
    if let Some(base) = base {
        let id = resolve_texture(&base, catalog.as_ref())?;
        data.set_control_base(pos, id);
        // Hand-painted texels leave the autoshader.
        data.set_control_auto(pos, false);
    }
    if let Some(overlay) = overlay {
        let id = resolve_texture(&overlay, catalog.as_ref())?;
        data.set_control_overlay(pos, id);
    }
    if let Some(blend) = blend {
        data.set_control_blend(pos, blend);
    }
    let c = data.get_control(pos).unwrap_or_default();
    info!(
        "control at ({x}, {z}): base {} overlay {} blend {:.2}",
        c.base(),
        c.overlay(),
        c.blend_unit()
    );
    tellus_io::save_directory(&mut data, dir)
}
