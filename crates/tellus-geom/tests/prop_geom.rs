use proptest::prelude::*;
use tellus_geom::{Aabb, Vec3};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    (-1e6f32..1e6f32).prop_filter("finite", |v| v.is_finite())
}

fn bounded_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn normalized_has_unit_length(v in bounded_vec3()) {
        let n = v.normalized();
        if v.length() > 1e-3 {
            prop_assert!(approx(n.length(), 1.0, 1e-3));
        }
    }

    #[test]
    fn dot_is_commutative(a in bounded_vec3(), b in bounded_vec3()) {
        prop_assert_eq!(a.dot(b), b.dot(a));
    }

    #[test]
    fn expand_point_contains_point(base in bounded_vec3(), p in bounded_vec3()) {
        let bb = Aabb::from_point(base).expand_point(p);
        prop_assert!(bb.contains(p));
        prop_assert!(bb.contains(base));
    }

    #[test]
    fn merge_contains_both_boxes(a in bounded_vec3(), b in bounded_vec3(), c in bounded_vec3()) {
        let left = Aabb::from_point(a).expand_point(b);
        let merged = left.merge(Aabb::from_point(c));
        prop_assert!(merged.contains(a));
        prop_assert!(merged.contains(b));
        prop_assert!(merged.contains(c));
    }
}

#[test]
fn nan_sentinel_is_not_finite() {
    assert!(!Vec3::NAN.is_finite());
    assert!(Vec3::UP.is_finite());
}
