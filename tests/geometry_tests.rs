mod support;

use approx::assert_abs_diff_eq;
use hyptile::{
    Geodesic, HyperbolicError, Mobius, PoincareDiskPoint, PolarPoint,
    coords::{disk_to_polar, polar_to_disk},
    distance, reflection, translation_in_disk,
};

#[test]
fn polar_disk_round_trip_on_random_points() {
    let mut rng = support::rng(1);
    for _ in 0..1000 {
        let p = support::random_polar(&mut rng, 0.999);
        let disk = polar_to_disk(&p).expect("inside the disk");
        let back = disk_to_polar(&disk);
        assert!(support::approx_eq(back.r, p.r, 1e-9), "{p:?} -> {back:?}");
        assert!(support::gap(&back, &p) < 1e-9);
    }
}

#[test]
fn boundary_radius_is_rejected() {
    assert_eq!(
        polar_to_disk(&PolarPoint::new(1.0, 0.5)),
        Err(HyperbolicError::InvalidRadius { radius: 1.0 })
    );
}

#[test]
fn mobius_inverse_is_a_two_sided_inverse() {
    let mut rng = support::rng(2);
    for _ in 0..500 {
        let m = support::random_mobius(&mut rng);
        let inv = m.inverse().expect("invertible");
        let z = support::random_polar(&mut rng, 0.95);
        for round in [Mobius::compose(&m, &inv), Mobius::compose(&inv, &m)] {
            let image = round.apply(z).expect("regular");
            assert!(support::gap(&image, &z) < 1e-6, "{z:?} -> {image:?}");
        }
    }
}

#[test]
fn composition_is_associative_in_effect() {
    let mut rng = support::rng(3);
    for _ in 0..200 {
        let (f, g, h) = (
            support::random_mobius(&mut rng),
            support::random_mobius(&mut rng),
            support::random_mobius(&mut rng),
        );
        let z = support::random_polar(&mut rng, 0.5);
        let left = f.then(&g).then(&h).apply(z);
        let right = f.then(&g.then(&h)).apply(z);
        match (left, right) {
            (Ok(a), Ok(b)) => {
                let scale = 1.0 + a.r.max(b.r);
                assert!(support::gap(&a, &b) < 1e-6 * scale, "{a:?} != {b:?}");
            },
            // z landed on a pole of the composite
            (Err(_), Err(_)) => {},
            other => panic!("associativity broken: {other:?}"),
        }
    }
}

#[test]
fn translation_carries_p_to_q() {
    let mut rng = support::rng(4);
    for _ in 0..1000 {
        let p = support::random_disk_point(&mut rng, 3.0);
        let q = support::random_disk_point(&mut rng, 3.0);
        let m = translation_in_disk(&p, &q).expect("valid points");
        let image = m.apply_to_disk(&p).expect("stays inside the disk");
        assert!(image.approx_eq(&q), "{p:?} -> {image:?}, expected {q:?}");
    }
}

#[test]
fn translations_are_isometries() {
    let mut rng = support::rng(5);
    for _ in 0..200 {
        let m = translation_in_disk(
            &support::random_disk_point(&mut rng, 2.0),
            &support::random_disk_point(&mut rng, 2.0),
        )
        .expect("valid points");
        let a = support::random_disk_point(&mut rng, 2.0);
        let b = support::random_disk_point(&mut rng, 2.0);
        let before = distance(&a, &b);
        let after = distance(
            &m.apply_to_disk(&a).expect("inside"),
            &m.apply_to_disk(&b).expect("inside"),
        );
        assert_abs_diff_eq!(before, after, epsilon = 1e-6);
    }
}

#[test]
fn distance_is_a_metric() {
    let mut rng = support::rng(6);
    for _ in 0..1000 {
        let p = support::random_disk_point(&mut rng, 4.0);
        let q = support::random_disk_point(&mut rng, 4.0);
        let r = support::random_disk_point(&mut rng, 4.0);
        assert_eq!(distance(&p, &p), 0.0);
        assert!(distance(&p, &q) >= 0.0);
        assert_abs_diff_eq!(distance(&p, &q), distance(&q, &p), epsilon = 1e-9);
        assert!(distance(&p, &r) <= distance(&p, &q) + distance(&q, &r) + 1e-6);
    }
}

#[test]
fn unit_distance_from_the_center_is_exact() {
    let center = PoincareDiskPoint::new(0.0, 0.0);
    let one = PoincareDiskPoint::new(1.0, 0.0);
    assert_eq!(distance(&center, &one), 1.0);
}

#[test]
fn reflections_are_involutions() {
    let mut rng = support::rng(7);
    for _ in 0..500 {
        let p = support::random_polar(&mut rng, 0.9);
        let q = support::random_polar(&mut rng, 0.9);
        if p.approx_eq(&q) {
            continue;
        }
        let mirror = reflection(&p, &q).expect("distinct points");
        let z = support::random_polar(&mut rng, 0.9);
        let twice = mirror.apply(&mirror.apply(&z).expect("regular")).expect("regular");
        assert!(support::gap(&twice, &z) < 1e-8, "{z:?} -> {twice:?}");
        // reflections preserve the disk
        assert!(mirror.apply(&z).expect("regular").r < 1.0);
    }
}

#[test]
fn geodesic_endpoints_lie_on_the_unit_circle() {
    let mut rng = support::rng(8);
    for _ in 0..500 {
        let p = support::random_polar(&mut rng, 0.9);
        let q = support::random_polar(&mut rng, 0.9);
        let Ok(geodesic) = Geodesic::from_two_points(&p, &q) else {
            continue;
        };
        let (w1, w2) = geodesic.ideal_points();
        assert_abs_diff_eq!(w1.r, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w2.r, 1.0, epsilon = 1e-12);
        if let Geodesic::Circular { center, radius } = geodesic {
            // the endpoints are where the geodesic circle meets the unit circle
            for w in [w1, w2] {
                let off = (w.to_cartesian() - center.to_cartesian()).norm();
                assert_abs_diff_eq!(off, radius, epsilon = 1e-9 * (1.0 + radius));
            }
        }
    }
}
