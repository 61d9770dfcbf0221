use proptest::prelude::*;
use tellus_control::Control;
use tellus_data::TerrainData;
use tellus_geom::Vec3;

const SIZE: u32 = 16;

fn in_region_pos() -> impl Strategy<Value = Vec3> {
    (0..SIZE, 0..SIZE).prop_map(|(x, z)| Vec3::new(x as f32, 0.0, z as f32))
}

proptest! {
    #[test]
    fn height_write_read_through_world_coords(pos in in_region_pos(), h in -1e4f32..1e4f32) {
        let mut data = TerrainData::new(SIZE, 1.0);
        data.add_region_blank((0, 0)).unwrap();
        data.set_height(pos, h);
        prop_assert_eq!(data.get_height_nearest(pos), h);
        let (lo, hi) = data.height_range();
        prop_assert!(lo <= h && h <= hi);
    }

    #[test]
    fn control_words_survive_world_addressing(pos in in_region_pos(), raw in any::<u32>()) {
        let mut data = TerrainData::new(SIZE, 1.0);
        data.add_region_blank((0, 0)).unwrap();
        data.set_control(pos, Control(raw));
        prop_assert_eq!(data.get_control(pos), Some(Control(raw)));
    }

    #[test]
    fn interpolated_height_stays_within_surrounding_range(
        heights in proptest::collection::vec(-100f32..100f32, (SIZE * SIZE) as usize),
        fx in 0.0f32..14.9,
        fz in 0.0f32..14.9,
    ) {
        let mut data = TerrainData::new(SIZE, 1.0);
        data.add_region_blank((0, 0)).unwrap();
        for z in 0..SIZE {
            for x in 0..SIZE {
                data.set_height(
                    Vec3::new(x as f32, 0.0, z as f32),
                    heights[(z * SIZE + x) as usize],
                );
            }
        }
        let h = data.get_height(Vec3::new(fx, 0.0, fz));
        // Bilerp is a convex combination of the 4 surrounding vertices.
        let x0 = fx.floor() as u32;
        let z0 = fz.floor() as u32;
        let corners = [
            heights[(z0 * SIZE + x0) as usize],
            heights[(z0 * SIZE + x0 + 1) as usize],
            heights[((z0 + 1) * SIZE + x0) as usize],
            heights[((z0 + 1) * SIZE + x0 + 1) as usize],
        ];
        let lo = corners.iter().cloned().fold(f32::MAX, f32::min) - 1e-3;
        let hi = corners.iter().cloned().fold(f32::MIN, f32::max) + 1e-3;
        prop_assert!(h >= lo && h <= hi, "h = {} outside {}..{}", h, lo, hi);
    }

    #[test]
    fn region_map_index_matches_manual_bounds(x in -40i32..40, z in -40i32..40) {
        let inside = (-16..16).contains(&x) && (-16..16).contains(&z);
        prop_assert_eq!(TerrainData::region_map_index((x, z)).is_some(), inside);
    }
}
