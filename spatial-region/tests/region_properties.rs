//! Property tests for region geometry over randomized inputs.
//!
//! Covers the algebraic guarantees spatial indexes rely on:
//! - Symmetry of intersection and minimum distance
//! - Containment implies intersection
//! - Combine idempotence and monotonicity
//! - Distance non-negativity and zero on overlap
//! - Overlap area consistency with intersection
//! - Binary and serde round-trips
//! - Hausdorff lower bounds never exceed upper bounds

#[cfg(test)]
mod region_property_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use spatial_region::{Point, Region, Shape};

    const ROUNDS: usize = 500;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn random_region(rng: &mut StdRng, dimension: usize) -> Region {
        let mut low = Vec::with_capacity(dimension);
        let mut high = Vec::with_capacity(dimension);
        for _ in 0..dimension {
            let a: f64 = rng.gen_range(-100.0..100.0);
            let b: f64 = rng.gen_range(-100.0..100.0);
            low.push(a.min(b));
            high.push(a.max(b));
        }
        Region::new(&low, &high).expect("low <= high by construction")
    }

    fn random_point(rng: &mut StdRng, dimension: usize) -> Point {
        let coords: Vec<f64> = (0..dimension).map(|_| rng.gen_range(-120.0..120.0)).collect();
        Point::new(&coords)
    }

    // =========================================================================
    // PREDICATES
    // =========================================================================

    #[test]
    fn test_intersection_and_distance_are_symmetric() {
        init();
        let mut rng = StdRng::seed_from_u64(7);
        for dimension in 1..=4 {
            for _ in 0..ROUNDS {
                let a = random_region(&mut rng, dimension);
                let b = random_region(&mut rng, dimension);
                assert_eq!(
                    a.intersects_region(&b).unwrap(),
                    b.intersects_region(&a).unwrap()
                );
                assert_eq!(
                    a.min_distance_region(&b).unwrap(),
                    b.min_distance_region(&a).unwrap()
                );
                assert_eq!(
                    a.max_distance_sq(&b).unwrap(),
                    b.max_distance_sq(&a).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_containment_implies_intersection() {
        init();
        let mut rng = StdRng::seed_from_u64(11);
        let mut contained = 0;
        for _ in 0..ROUNDS {
            let a = random_region(&mut rng, 2);
            let b = random_region(&mut rng, 2);
            let inner = a.intersecting_region(&b).unwrap();
            if inner.is_infinite() {
                continue;
            }
            assert!(a.contains_region(&inner).unwrap());
            assert!(a.intersects_region(&inner).unwrap());
            contained += 1;
        }
        assert!(contained > 0);
    }

    #[test]
    fn test_contained_points_have_zero_distance() {
        init();
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..ROUNDS {
            let r = random_region(&mut rng, 3);
            let p = random_point(&mut rng, 3);
            let inside = r.contains_point(&p).unwrap();
            let distance = r.min_distance_point(&p).unwrap();
            assert!(distance >= 0.0);
            assert_eq!(inside, distance == 0.0);
            assert_eq!(inside, r.intersects_shape(&p).unwrap());
        }
    }

    // =========================================================================
    // COMBINATION
    // =========================================================================

    #[test]
    fn test_combine_is_idempotent_and_monotone() {
        init();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..ROUNDS {
            let a = random_region(&mut rng, 2);
            let b = random_region(&mut rng, 2);

            let mut same = a.clone();
            same.combine_region(&a).unwrap();
            assert_eq!(same, a);

            let mut union = a.clone();
            union.combine_region(&b).unwrap();
            assert!(union.contains_region(&a).unwrap());
            assert!(union.contains_region(&b).unwrap());
            assert_eq!(union, a.combined_region(&b).unwrap());
        }
    }

    #[test]
    fn test_combining_points_from_infinite_bounds_them() {
        init();
        let mut rng = StdRng::seed_from_u64(19);
        let points: Vec<Point> = (0..50).map(|_| random_point(&mut rng, 3)).collect();

        let mut bounds = Region::infinite(3);
        for p in &points {
            bounds.combine_point(p).unwrap();
        }
        assert!(!bounds.is_infinite());
        for p in &points {
            assert!(bounds.contains_point(p).unwrap());
        }
    }

    // =========================================================================
    // DISTANCES AND AREAS
    // =========================================================================

    #[test]
    fn test_distance_is_zero_exactly_on_overlap() {
        init();
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..ROUNDS {
            let a = random_region(&mut rng, 2);
            let b = random_region(&mut rng, 2);
            let distance = a.min_distance_region(&b).unwrap();
            assert!(distance >= 0.0);
            assert_eq!(a.intersects_region(&b).unwrap(), distance == 0.0);
            assert!(a.min_distance_sq_region(&b).unwrap() <= a.max_distance_sq(&b).unwrap());
        }
    }

    #[test]
    fn test_intersecting_area_matches_overlap() {
        init();
        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..ROUNDS {
            let a = random_region(&mut rng, 2);
            let b = random_region(&mut rng, 2);
            let area = a.intersecting_area(&b).unwrap();
            if a.intersects_region(&b).unwrap() {
                let overlap = a.intersecting_region(&b).unwrap();
                assert!((area - overlap.area()).abs() < 1e-9);
            } else {
                assert_eq!(area, 0.0);
            }
        }
    }

    // =========================================================================
    // ENCODING
    // =========================================================================

    #[test]
    fn test_binary_round_trip() {
        init();
        let mut rng = StdRng::seed_from_u64(31);
        for dimension in 0..=5 {
            let r = random_region(&mut rng, dimension);
            let bytes = r.to_bytes();
            assert_eq!(bytes.len(), 4 + 16 * dimension);
            assert_eq!(Region::from_bytes(&bytes).unwrap(), r);
        }

        let infinite = Region::infinite(2);
        assert!(Region::from_bytes(&infinite.to_bytes()).unwrap().is_infinite());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde_round_trip() {
        init();
        let mut rng = StdRng::seed_from_u64(37);
        let r = random_region(&mut rng, 3);
        let json = serde_json::to_string(&r).unwrap();
        let decoded: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, r);
    }

    // =========================================================================
    // HAUSDORFF BOUNDS
    // =========================================================================

    #[test]
    fn test_hausdorff_lower_bound_below_upper_bound() {
        init();
        let mut rng = StdRng::seed_from_u64(41);
        for _ in 0..ROUNDS {
            let a = random_region(&mut rng, 2);
            let b = random_region(&mut rng, 2);
            let lb = a.haus_dist_lb(&b).unwrap();
            let ub = a.haus_dist_ub_region(&b).unwrap();
            assert!(lb <= ub + 1e-9, "lb {} > ub {} for {} / {}", lb, ub, a, b);

            let mlb = a.mhaus_dist_lb(&b).unwrap();
            assert!(mlb <= lb + 1e-9);
        }
    }

    #[test]
    fn test_batch_bounds_agree_with_single_candidate() {
        init();
        let mut rng = StdRng::seed_from_u64(43);
        for _ in 0..ROUNDS {
            let a = random_region(&mut rng, 2);
            let b = random_region(&mut rng, 2);
            let mut counter = 0;

            assert_eq!(
                a.haus_dist_lb_batch(&[&b], 0.0, &mut counter).unwrap(),
                a.haus_dist_lb(&b).unwrap()
            );
            assert_eq!(counter, 4);
            assert_eq!(
                a.mhaus_dist_lb_batch(&[&b]).unwrap(),
                a.mhaus_dist_lb(&b).unwrap()
            );
            let shapes: [&dyn Shape; 1] = [&b];
            assert_eq!(
                a.haus_dist_ub_batch(&shapes).unwrap(),
                a.haus_dist_ub_region(&b).unwrap()
            );
        }
    }

    #[test]
    fn test_point_upper_bound_covers_region() {
        init();
        let mut rng = StdRng::seed_from_u64(47);
        for _ in 0..ROUNDS {
            let r = random_region(&mut rng, 2);
            let p = random_point(&mut rng, 2);
            let ub = r.haus_dist_ub_point(&p).unwrap();
            // no point of the region is farther than its farthest corner
            let center = r.center();
            assert!(p.distance_sq(&center).unwrap().sqrt() <= ub + 1e-9);
            assert!(r.min_distance_point(&p).unwrap() <= ub + 1e-9);
        }
    }
}
