use approx::assert_relative_eq;
use proptest::prelude::*;
use race_chart::core::{FrameValues, interpolate, lerp};

fn values(pairs: &[(&str, f64)]) -> FrameValues {
    pairs
        .iter()
        .map(|(label, value)| ((*label).to_owned(), *value))
        .collect()
}

#[test]
fn midpoint_blends_linearly() {
    let a = values(&[("Alpha", 0.0), ("Beta", 10.0)]);
    let b = values(&[("Alpha", 10.0), ("Beta", 30.0)]);
    let mid = interpolate(&a, &b, 0.5);
    assert_relative_eq!(mid["Alpha"], 5.0);
    assert_relative_eq!(mid["Beta"], 20.0);
    assert_relative_eq!(lerp(2.0, 4.0, 0.25), 2.5);
}

#[test]
fn out_of_range_fraction_is_clamped() {
    let a = values(&[("Alpha", 1.0)]);
    let b = values(&[("Alpha", 3.0)]);
    assert_eq!(interpolate(&a, &b, -2.0)["Alpha"], 1.0);
    assert_eq!(interpolate(&a, &b, 9.0)["Alpha"], 3.0);
    assert_eq!(interpolate(&a, &b, f64::NAN)["Alpha"], 1.0);
}

#[test]
fn labels_missing_on_one_side_blend_from_zero() {
    let a = values(&[("Alpha", 4.0)]);
    let b = values(&[("Beta", 8.0)]);
    let mid = interpolate(&a, &b, 0.5);
    let order: Vec<&str> = mid.keys().map(String::as_str).collect();
    assert_eq!(order, vec!["Alpha", "Beta"]);
    assert_relative_eq!(mid["Alpha"], 2.0);
    assert_relative_eq!(mid["Beta"], 4.0);
}

proptest! {
    #[test]
    fn endpoints_are_exact(
        a in proptest::collection::vec(-1.0e9f64..1.0e9, 1..8),
        b in proptest::collection::vec(-1.0e9f64..1.0e9, 1..8),
    ) {
        let len = a.len().min(b.len());
        let from: FrameValues = a[..len].iter().enumerate().map(|(i, v)| (format!("s{i}"), *v)).collect();
        let to: FrameValues = b[..len].iter().enumerate().map(|(i, v)| (format!("s{i}"), *v)).collect();

        let start = interpolate(&from, &to, 0.0);
        let end = interpolate(&from, &to, 1.0);
        for (label, value) in &from {
            prop_assert_eq!(start[label].to_bits(), value.to_bits());
        }
        for (label, value) in &to {
            prop_assert_eq!(end[label].to_bits(), value.to_bits());
        }
    }

    #[test]
    fn zero_at_both_ends_stays_zero(t in -1.0f64..2.0, other in 0.0f64..1.0e6) {
        let from = values(&[("Zero", 0.0), ("Other", other)]);
        let to = values(&[("Zero", 0.0), ("Other", other * 2.0)]);
        let blended = interpolate(&from, &to, t);
        prop_assert_eq!(blended["Zero"], 0.0);
    }

    #[test]
    fn blend_stays_between_endpoints(a in 0.0f64..1.0e6, b in 0.0f64..1.0e6, t in 0.0f64..=1.0) {
        let blended = interpolate(&values(&[("x", a)]), &values(&[("x", b)]), t)["x"];
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(blended >= low - 1e-6 && blended <= high + 1e-6);
    }
}
