mod support;

use approx::assert_abs_diff_eq;
use hyptile::{
    PoincareDiskPoint, Tiling, distance,
    float_types::{Real, TAU, normalize_angle},
    tiling::{adjacent_center_distance, outer_radius},
    translation_in_disk,
};

#[test]
fn five_five_center_tile() {
    assert_abs_diff_eq!(outer_radius(5, 5), 0.5559, epsilon = 1e-4);
    let tiling = Tiling::new(5, 5).expect("hyperbolic");
    let center = &tiling.tiles()[0];
    assert_eq!(center.level, 0);
    assert_eq!(center.boundary.len(), 5);
    let corners = tiling.tile_vertices(center);
    for (i, corner) in corners.iter().enumerate() {
        let polar = corner.to_polar();
        assert_abs_diff_eq!(polar.r, outer_radius(5, 5), epsilon = 1e-12);
        let step = normalize_angle(corners[(i + 1) % 5].angle - corner.angle);
        assert_abs_diff_eq!(step, TAU / 5.0, epsilon = 1e-9);
    }
}

#[test]
fn five_five_first_ring() {
    let mut tiling = Tiling::new(5, 5).expect("hyperbolic");
    tiling.grow_level().expect("grows");
    assert_eq!(tiling.tiles().len(), 6);
    let center_boundary = &tiling.tiles()[0].boundary;
    for tile in &tiling.tiles()[1..] {
        assert_eq!(tile.level, 1);
        let shared = tile.boundary.iter().filter(|v| center_boundary.contains(v)).count();
        assert_eq!(shared, 2, "tile {} shares {shared} vertices", tile.index);
        let crossings = tiling
            .crossings()
            .iter()
            .filter(|c| c.tiles == (0, tile.index))
            .count();
        assert_eq!(crossings, 1);
    }
}

#[test]
fn ring_sizes() {
    let cases: [(usize, usize, &[usize]); 4] = [
        (5, 5, &[1, 5, 20, 70]),
        (7, 3, &[1, 7, 21, 56]),
        (4, 5, &[1, 4, 12, 28]),
        (3, 7, &[1, 3, 6, 12]),
    ];
    for (p, q, expected) in cases {
        let tiling = support::grown(p, q, expected.len() - 1);
        assert_eq!(support::tiles_per_level(&tiling), expected, "{{{p}, {q}}}");
    }
}

#[test]
fn end_of_level_is_reported_once_per_ring() {
    let mut tiling = Tiling::new(7, 3).expect("hyperbolic");
    for ring in 1..=3 {
        let before = tiling.tiles().len();
        let mut calls = 0;
        let mut level_up = true;
        loop {
            calls += 1;
            if tiling.grow_one_reflection(level_up).expect("grows") {
                break;
            }
            level_up = false;
            assert!(tiling.is_growing());
        }
        assert!(!tiling.is_growing());
        assert_eq!(tiling.level(), ring);
        assert_eq!(tiling.tiles().len() - before, calls, "one tile per call in ring {ring}");
        // nothing left to grow until a new ring is started
        assert!(tiling.grow_one_reflection(false).expect("noop"));
        assert_eq!(tiling.level(), ring);
    }
}

#[test]
fn crossings_share_vertex_indices() {
    for (p, q) in [(5, 5), (7, 3), (4, 6), (3, 8)] {
        let tiling = support::grown(p, q, 3);
        assert!(tiling.validate().is_empty(), "{:?}", tiling.validate());
        for tile in tiling.tiles() {
            assert_eq!(tile.boundary.len(), p);
        }
        for crossing in tiling.crossings() {
            let (a, b) = crossing.tiles;
            assert!(a < b);
            let (u, v) = crossing.edge;
            for t in [a, b] {
                let boundary = &tiling.tiles()[t].boundary;
                assert!(boundary.contains(&u) && boundary.contains(&v));
            }
        }
    }
}

#[test]
fn interior_tiles_are_surrounded() {
    let tiling = support::grown(5, 4, 3);
    for tile in tiling.tiles().iter().filter(|t| t.level < tiling.level()) {
        let neighbors = tiling.neighbors(tile.index);
        assert_eq!(neighbors.len(), 5, "tile {} has {neighbors:?}", tile.index);
        for n in neighbors {
            let level = tiling.tiles()[n].level;
            assert!(level.abs_diff(tile.level) <= 1);
        }
    }
}

#[test]
fn adjacent_centers_are_one_step_apart() {
    for (p, q) in [(5, 5), (7, 3), (4, 5)] {
        let tiling = support::grown(p, q, 3);
        let step = adjacent_center_distance(p, q).expect("hyperbolic");
        for crossing in tiling.crossings() {
            let (a, b) = crossing.tiles;
            let d = distance(&tiling.tiles()[a].center, &tiling.tiles()[b].center);
            assert_abs_diff_eq!(d, step, epsilon = 1e-6);
        }
    }
}

#[test]
fn every_tile_is_a_counter_clockwise_copy_of_the_seed() {
    let (p, q) = (5, 5);
    let tiling = support::grown(p, q, 3);
    let circumradius = tiling.tile_vertices(&tiling.tiles()[0])[0].d;
    for tile in tiling.tiles().iter().skip(1) {
        let recenter =
            translation_in_disk(&tile.center, &PoincareDiskPoint::center()).expect("off centre");
        let corners = tiling
            .tile_vertices(tile)
            .iter()
            .map(|v| recenter.apply_to_disk(v).expect("inside"))
            .collect::<Vec<_>>();
        for (i, corner) in corners.iter().enumerate() {
            assert_abs_diff_eq!(corner.d, circumradius, epsilon = 1e-6);
            let step = normalize_angle(corners[(i + 1) % p].angle - corner.angle);
            assert_abs_diff_eq!(step, TAU / p as Real, epsilon = 1e-6);
        }
    }
}

#[test]
fn no_two_tiles_coincide() {
    let tiling = support::grown(4, 5, 3);
    let tiles = tiling.tiles();
    for (i, a) in tiles.iter().enumerate() {
        for b in &tiles[i + 1..] {
            assert!(!a.center.approx_eq(&b.center), "tiles {} and {} coincide", a.index, b.index);
        }
    }
}

#[test]
fn truncate_and_regrow_reuses_everything() {
    let mut tiling = support::grown(5, 5, 3);
    let tiles = tiling.tiles().to_vec();
    let crossings = tiling.crossings().to_vec();
    let vertices = tiling.vertices().len();

    tiling.set_level(1).expect("truncates");
    assert_eq!(tiling.tiles().len(), 6);
    assert!(tiling.crossings().iter().all(|c| c.tiles.1 < 6));
    assert_eq!(tiling.vertices().len(), vertices);

    tiling.set_level(3).expect("regrows");
    assert_eq!(tiling.tiles(), tiles.as_slice());
    assert_eq!(tiling.crossings(), crossings.as_slice());
    assert_eq!(tiling.vertices().len(), vertices);
}

#[test]
fn set_level_to_current_is_a_noop() {
    let mut tiling = support::grown(6, 4, 2);
    let count = tiling.tiles().len();
    tiling.set_level(2).expect("noop");
    assert_eq!(tiling.tiles().len(), count);
}

#[test]
fn vertices_stay_inside_the_disk() {
    let tiling = support::grown(7, 3, 4);
    for v in tiling.vertices().iter() {
        let r = v.to_polar().r;
        assert!(r < 1.0 && r >= 0.0);
        assert!(v.d.is_finite());
    }
}
