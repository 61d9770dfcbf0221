use tellus_control::Control;
use tellus_data::TerrainData;
use tellus_geom::Vec3;

const SIZE: u32 = 16;

fn store() -> TerrainData {
    let mut data = TerrainData::new(SIZE, 1.0);
    data.add_region_blank((0, 0)).unwrap();
    data
}

#[test]
fn flat_region_reads_zero_everywhere() {
    let data = store();
    assert_eq!(data.get_height(Vec3::new(3.0, 0.0, 4.0)), 0.0);
    assert_eq!(data.get_height(Vec3::new(7.3, 0.0, 2.6)), 0.0);
    assert_eq!(data.get_height_nearest(Vec3::new(15.0, 0.0, 15.0)), 0.0);
}

#[test]
fn reads_outside_any_region_are_nan() {
    let data = store();
    assert!(data.get_height(Vec3::new(-5.0, 0.0, 3.0)).is_nan());
    assert!(data.get_height_nearest(Vec3::new(100.0, 0.0, 0.0)).is_nan());
    assert!(data.get_control(Vec3::new(-5.0, 0.0, 3.0)).is_none());
    assert!(data.get_color(Vec3::new(-5.0, 0.0, 3.0)).r.is_nan());
}

#[test]
fn linear_slope_interpolates_exactly() {
    let mut data = store();
    for z in 0..SIZE {
        for x in 0..SIZE {
            data.set_height(Vec3::new(x as f32, 0.0, z as f32), x as f32);
        }
    }
    // On-vertex read takes the nearest-vertex shortcut.
    assert_eq!(data.get_height(Vec3::new(4.0, 0.0, 7.0)), 4.0);
    // Off-vertex read bilerps; a plane is reproduced exactly.
    let h = data.get_height(Vec3::new(3.5, 0.0, 2.25));
    assert!((h - 3.5).abs() < 1e-5);
}

#[test]
fn holes_read_as_nan_height() {
    let mut data = store();
    let pos = Vec3::new(5.0, 0.0, 5.0);
    data.set_height(pos, 9.0);
    data.set_control_hole(pos, true);
    assert!(data.get_height(pos).is_nan());
    assert!(data.get_texture_blend(pos).is_none());
    // Clearing the hole restores the height.
    data.set_control_hole(pos, false);
    assert_eq!(data.get_height(pos), 9.0);
}

#[test]
fn normal_of_flat_ground_is_up() {
    let data = store();
    let n = data.get_normal(Vec3::new(4.0, 0.0, 4.0));
    assert!((n.y - 1.0).abs() < 1e-6);
    assert!(n.x.abs() < 1e-6 && n.z.abs() < 1e-6);
}

#[test]
fn normal_and_slope_of_a_ramp() {
    let mut data = store();
    for z in 0..SIZE {
        for x in 0..SIZE {
            data.set_height(Vec3::new(x as f32, 0.0, z as f32), x as f32);
        }
    }
    let n = data.get_normal(Vec3::new(4.0, 0.0, 4.0));
    // h = x rises one unit per unit of x: 45 degrees.
    assert!((n.dot(Vec3::UP) - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
    assert!(data.is_in_slope(Vec3::new(4.0, 0.0, 4.0), (40.0, 50.0), false));
    assert!(!data.is_in_slope(Vec3::new(4.0, 0.0, 4.0), (0.0, 30.0), false));
    assert!(data.is_in_slope(Vec3::new(4.0, 0.0, 4.0), (0.0, 30.0), true));
}

#[test]
fn slope_is_false_outside_regions() {
    let data = store();
    assert!(!data.is_in_slope(Vec3::new(-50.0, 0.0, 0.0), (0.0, 90.0), false));
}

#[test]
fn painting_texture_fields_composes() {
    let mut data = store();
    let pos = Vec3::new(2.0, 0.0, 3.0);
    data.set_control_base(pos, 5);
    data.set_control_overlay(pos, 3);
    data.set_control_blend(pos, 0.5);
    data.set_control_navigation(pos, true);

    let c = data.get_control(pos).unwrap();
    assert_eq!(c.base(), 5);
    assert_eq!(c.overlay(), 3);
    assert!(c.is_nav());

    let (base, overlay, blend) = data.get_texture_blend(pos).unwrap();
    assert_eq!((base, overlay), (5, 3));
    assert!((blend - 0.5).abs() < 0.01);
}

#[test]
fn negative_region_addressing() {
    let mut data = TerrainData::new(SIZE, 1.0);
    data.add_region_blank((-1, -1)).unwrap();
    let pos = Vec3::new(-3.0, 0.0, -7.0);
    data.set_height(pos, 2.5);
    assert_eq!(data.get_height_nearest(pos), 2.5);
    assert_eq!(data.region_location(pos), (-1, -1));
}

#[test]
fn import_then_export_roundtrip() {
    let mut data = TerrainData::new(SIZE, 1.0);
    let width = SIZE * 2;
    let depth = SIZE;
    let grid: Vec<f32> = (0..width * depth).map(|i| (i % 7) as f32).collect();
    data.import_heights(Vec3::ZERO, width, depth, &grid, 0.0, 1.0)
        .unwrap();
    assert_eq!(data.region_count(), 2);

    let (origin, w, d, out) = data.export_heights().unwrap();
    assert_eq!(origin, Vec3::ZERO);
    assert_eq!((w, d), (width, depth));
    for (a, b) in grid.iter().zip(out.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn import_applies_scale_then_offset() {
    let mut data = store();
    let grid = vec![2.0f32; (SIZE * SIZE) as usize];
    data.import_heights(Vec3::ZERO, SIZE, SIZE, &grid, 10.0, 3.0)
        .unwrap();
    assert_eq!(data.get_height_nearest(Vec3::new(1.0, 0.0, 1.0)), 16.0);
    let (lo, hi) = data.height_range();
    assert!(lo <= 16.0 && hi >= 16.0);
}

#[test]
fn import_rejects_wrong_length() {
    let mut data = store();
    assert!(data.import_heights(Vec3::ZERO, 4, 4, &[0.0; 3], 0.0, 1.0).is_err());
}

#[test]
fn uv_lookups_at_position() {
    let mut data = store();
    let pos = Vec3::new(1.0, 0.0, 1.0);
    data.map_control(pos, |c: Control| c.with_uv_angle(2).with_uv_scale(1));
    assert_eq!(data.get_uv_angle_degrees(pos), 45.0);
    assert_eq!(data.get_uv_scale_percent(pos), 20.0);
    assert!(data.get_uv_angle_degrees(Vec3::new(-99.0, 0.0, 0.0)).is_nan());
}
