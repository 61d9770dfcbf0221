//! Region file persistence: one binary file per region, named by location.
#![forbid(unsafe_code)]

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tellus_data::TerrainData;
use tellus_region::{CURRENT_VERSION, Region, Rgba};

pub const FILE_PREFIX: &str = "tellus";
pub const FILE_EXT: &str = "rgn";

/// On-disk region payload. Control words are stored as raw u32; height
/// range is derived on load rather than trusted from the file.
#[derive(Serialize, Deserialize)]
struct RegionFile {
    version: u32,
    location: (i32, i32),
    region_size: u32,
    heights: Vec<f32>,
    controls: Vec<u32>,
    colors: Vec<[f32; 4]>,
}

/// `(-1, 2)` formats as `-01_02`: non-negative coordinates as `_NN`,
/// negative as `-NN`, three characters each.
pub fn location_to_string((x, y): (i32, i32)) -> String {
    let part = |v: i32| {
        if v >= 0 {
            format!("_{v:02}")
        } else {
            format!("{v:03}")
        }
    };
    format!("{}{}", part(x), part(y))
}

pub fn location_to_filename(loc: (i32, i32)) -> String {
    format!("{FILE_PREFIX}{}.{FILE_EXT}", location_to_string(loc))
}

/// Inverse of [`location_to_filename`]; rejects foreign filenames.
pub fn filename_to_location(filename: &str) -> Option<(i32, i32)> {
    let rest = filename
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(&format!(".{FILE_EXT}"))?;
    if rest.len() != 6 || !rest.is_ascii() {
        return None;
    }
    let part = |s: &str| -> Option<i32> {
        match s.strip_prefix('_') {
            Some(digits) => digits.parse().ok(),
            None => s.parse().ok(),
        }
    };
    Some((part(&rest[..3])?, part(&rest[3..])?))
}

pub fn region_path(dir: &Path, loc: (i32, i32)) -> PathBuf {
    dir.join(location_to_filename(loc))
}

/// Writes one region if modified, clearing its modified flag. Returns
/// false when the write was skipped.
pub fn save_region(region: &mut Region, dir: &Path) -> Result<bool, Box<dyn Error>> {
    if !region.is_modified() {
        info!("region {:?} not modified, skipping save", region.location());
        return Ok(false);
    }
    let path = region_path(dir, region.location());
    info!("writing region {:?} to {}", region.location(), path.display());
    let payload = RegionFile {
        version: CURRENT_VERSION,
        location: region.location(),
        region_size: region.region_size(),
        heights: region.heights().data().to_vec(),
        controls: region.controls().data().to_vec(),
        colors: region
            .colors()
            .data()
            .iter()
            .map(|c| [c.r, c.g, c.b, c.a])
            .collect(),
    };
    fs::write(&path, bincode::serialize(&payload)?)?;
    region.set_modified(false);
    Ok(true)
}

/// Reads one region file. The stored height range is not trusted;
/// `Region::from_maps` re-derives it (and pads/crops bad map lengths).
pub fn load_region(dir: &Path, loc: (i32, i32)) -> Result<Region, Box<dyn Error>> {
    let path = region_path(dir, loc);
    let bytes = fs::read(&path)?;
    let payload: RegionFile = bincode::deserialize(&bytes)?;
    if payload.version != CURRENT_VERSION {
        warn!(
            "region file {} is version {}, current is {CURRENT_VERSION}",
            path.display(),
            payload.version
        );
    }
    if payload.location != loc {
        return Err(format!(
            "region file {} claims location {:?}, expected {loc:?}",
            path.display(),
            payload.location
        )
        .into());
    }
    let colors = payload
        .colors
        .into_iter()
        .map(|[r, g, b, a]| Rgba::new(r, g, b, a))
        .collect();
    Ok(Region::from_maps(
        loc,
        payload.region_size,
        payload.heights,
        payload.controls,
        colors,
    ))
}

/// Saves every loaded region into `dir` (created if missing). Regions
/// flagged deleted have their file removed and leave the store.
pub fn save_directory(data: &mut TerrainData, dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    info!("saving data files to {}", dir.display());
    let locations: Vec<(i32, i32)> = data.locations().to_vec();
    for loc in locations {
        if data.is_region_deleted(loc) {
            let path = region_path(dir, loc);
            if path.exists() {
                fs::remove_file(&path)?;
                info!("removed deleted region file {}", path.display());
            }
            data.remove_region(loc);
            continue;
        }
        if let Some(region) = data.get_region_mut(loc) {
            save_region(region, dir)?;
        }
    }
    Ok(())
}

/// Loads every region file in `dir` into the store. Files whose region
/// size disagrees with the store are skipped with a warning.
pub fn load_directory(data: &mut TerrainData, dir: &Path) -> Result<(), Box<dyn Error>> {
    info!("loading data files from {}", dir.display());
    let mut loaded = 0usize;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(loc) = filename_to_location(name) else {
            continue;
        };
        let region = load_region(dir, loc)?;
        if region.region_size() != data.region_size() {
            warn!(
                "skipping {}: region size {} != store size {}",
                name,
                region.region_size(),
                data.region_size()
            );
            continue;
        }
        data.add_region(region)?;
        loaded += 1;
    }
    info!("loaded {loaded} regions");
    Ok(())
}
