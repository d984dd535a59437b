//! Property tests for the angle engine

use proptest::prelude::*;
use trainer_web::angle_at;

fn point() -> impl Strategy<Value = (f32, f32)> {
    (-1000.0f32..1000.0, -1000.0f32..1000.0)
}

fn small_point() -> impl Strategy<Value = (f32, f32)> {
    (-10.0f32..10.0, -10.0f32..10.0)
}

/// Any f32 bit pattern, including infinities, NaN and values near `f32::MAX`
fn any_point() -> impl Strategy<Value = (f32, f32)> {
    (prop::num::f32::ANY, prop::num::f32::ANY)
}

fn huge_point() -> impl Strategy<Value = (f32, f32)> {
    (-1e30f32..1e30, -1e30f32..1e30)
}

fn far_apart(p: (f32, f32), q: (f32, f32)) -> bool {
    let (dx, dy) = (p.0 - q.0, p.1 - q.1);
    (dx * dx + dy * dy).sqrt() > 1e-2
}

proptest! {
    #[test]
    fn angle_stays_in_half_open_range(a in point(), v in point(), c in point()) {
        prop_assume!(far_apart(a, v) && far_apart(c, v));
        let angle = angle_at(a, v, c).unwrap();
        prop_assert!(angle > -180.0 && angle <= 180.0, "angle {}", angle);
    }

    #[test]
    fn swapping_ends_negates_sign(a in point(), v in point(), c in point()) {
        prop_assume!(far_apart(a, v) && far_apart(c, v));
        let forward = angle_at(a, v, c).unwrap();
        let reverse = angle_at(c, v, a).unwrap();
        prop_assert!((forward.abs() - reverse.abs()).abs() < 1e-3);
        if forward.abs() < 179.9 {
            prop_assert!((forward + reverse).abs() < 1e-3, "{} vs {}", forward, reverse);
        }
    }

    #[test]
    fn never_yields_non_finite_angle(a in any_point(), v in any_point(), c in any_point()) {
        if let Some(angle) = angle_at(a, v, c) {
            prop_assert!(angle.is_finite(), "{:?} {:?} {:?} -> {}", a, v, c, angle);
            prop_assert!(angle > -180.0 && angle <= 180.0, "angle {}", angle);
        }
    }

    #[test]
    fn huge_coordinates_keep_an_angle(a in huge_point(), v in huge_point(), c in huge_point()) {
        prop_assume!(far_apart(a, v) && far_apart(c, v));
        let angle = angle_at(a, v, c);
        prop_assert!(matches!(angle, Some(deg) if deg.is_finite()), "{:?}", angle);
    }

    #[test]
    fn coincident_end_has_no_angle(v in point(), c in point()) {
        prop_assert_eq!(angle_at(v, v, c), None);
        prop_assert_eq!(angle_at(c, v, v), None);
    }

    #[test]
    fn translation_does_not_change_angle(
        a in small_point(), v in small_point(), c in small_point(),
        shift in small_point(),
    ) {
        prop_assume!(far_apart(a, v) && far_apart(c, v));
        let moved = |p: (f32, f32)| (p.0 + shift.0, p.1 + shift.1);
        let base = angle_at(a, v, c).unwrap();
        let shifted = angle_at(moved(a), moved(v), moved(c)).unwrap();
        // Angles near ±180 may flip sides under rounding
        let diff = (base - shifted).abs();
        prop_assert!(diff < 0.1 || (360.0 - diff) < 0.1, "{} vs {}", base, shifted);
    }
}
