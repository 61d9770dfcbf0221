use std::fs;
use std::path::PathBuf;

use tellus_control::Control;
use tellus_data::TerrainData;
use tellus_geom::Vec3;
use tellus_io::{load_directory, load_region, region_path, save_directory, save_region};
use tellus_region::Region;

const SIZE: u32 = 16;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tellus-io-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn save_then_load_preserves_all_maps() {
    let dir = scratch_dir("roundtrip");
    let mut region = Region::new_blank((-1, 2), SIZE);
    region.set_height(3, 4, 12.5);
    region.set_control(5, 6, Control(0).with_base(5).with_overlay(3).with_hole(true));
    region.set_roughness(7, 8, 0.8);

    assert!(save_region(&mut region, &dir).unwrap());
    assert!(!region.is_modified());

    let loaded = load_region(&dir, (-1, 2)).unwrap();
    assert_eq!(loaded.get_height(3, 4), 12.5);
    let c = loaded.get_control(5, 6);
    assert_eq!(c.base(), 5);
    assert_eq!(c.overlay(), 3);
    assert!(c.is_hole());
    assert_eq!(loaded.get_roughness(7, 8), 0.8);
    // Height range is re-derived, not read from disk.
    assert_eq!(loaded.height_range(), (0.0, 12.5));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unmodified_regions_skip_the_write() {
    let dir = scratch_dir("skip");
    let mut region = Region::new_blank((0, 0), SIZE);
    assert!(!save_region(&mut region, &dir).unwrap());
    assert!(!region_path(&dir, (0, 0)).exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn directory_roundtrip_through_terrain_data() {
    let dir = scratch_dir("dir");
    let mut data = TerrainData::new(SIZE, 1.0);
    data.add_region_blank((0, 0)).unwrap();
    data.add_region_blank((-1, 0)).unwrap();
    data.set_height(Vec3::new(2.0, 0.0, 2.0), 7.0);
    data.set_height(Vec3::new(-3.0, 0.0, 1.0), -2.0);
    save_directory(&mut data, &dir).unwrap();

    let mut reloaded = TerrainData::new(SIZE, 1.0);
    load_directory(&mut reloaded, &dir).unwrap();
    assert_eq!(reloaded.region_count(), 2);
    assert_eq!(reloaded.get_height_nearest(Vec3::new(2.0, 0.0, 2.0)), 7.0);
    assert_eq!(reloaded.get_height_nearest(Vec3::new(-3.0, 0.0, 1.0)), -2.0);
    let (lo, hi) = reloaded.height_range();
    assert!(lo <= -2.0 && hi >= 7.0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn deleted_regions_lose_their_files_on_save() {
    let dir = scratch_dir("deleted");
    let mut data = TerrainData::new(SIZE, 1.0);
    data.add_region_blank((1, 1)).unwrap();
    data.set_height(Vec3::new(17.0, 0.0, 17.0), 1.0);
    save_directory(&mut data, &dir).unwrap();
    assert!(region_path(&dir, (1, 1)).exists());

    data.set_region_deleted((1, 1), true);
    save_directory(&mut data, &dir).unwrap();
    assert!(!region_path(&dir, (1, 1)).exists());
    assert_eq!(data.region_count(), 0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn size_mismatched_files_are_skipped_on_load() {
    let dir = scratch_dir("mismatch");
    let mut region = Region::new_blank((0, 0), 32);
    region.set_height(0, 0, 1.0);
    save_region(&mut region, &dir).unwrap();

    let mut data = TerrainData::new(SIZE, 1.0);
    load_directory(&mut data, &dir).unwrap();
    assert_eq!(data.region_count(), 0);

    fs::remove_dir_all(&dir).unwrap();
}
