//! Correctness of fixed radius search against brute force and R-tree oracles.

use radius_search::{Metric, Point3, RadiusSearch, ResultSet, Scalar, fixed_radius_search};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rstar::RTree;
use rstar::primitives::GeomWithData;
use std::collections::BTreeSet;

const NUM_POINTS_QUERIES: [(usize, usize); 4] = [(10, 5), (31, 33), (33, 31), (123, 345)];
const RADII: [f64; 2] = [0.1, 0.3];
const HASH_TABLE_SIZE_FACTORS: [f64; 2] = [1.0 / 8.0, 1.0 / 64.0];

fn random_points<T: Scalar>(rng: &mut ChaCha8Rng, n: usize) -> Vec<Point3<T>> {
    (0..n)
        .map(|_| {
            Point3::new(
                T::from_f64(rng.random::<f64>()),
                T::from_f64(rng.random::<f64>()),
                T::from_f64(rng.random::<f64>()),
            )
        })
        .collect()
}

/// Reported distance, computed directly from the metric definitions.
fn reference_distance<T: Scalar>(metric: Metric, a: &Point3<T>, b: &Point3<T>) -> T {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    match metric {
        Metric::L1 => dx.abs() + dy.abs() + dz.abs(),
        Metric::L2 => dx * dx + dy * dy + dz * dz,
        Metric::Linf => dx.abs().max(dy.abs()).max(dz.abs()),
    }
}

fn brute_force<T: Scalar>(
    points: &[Point3<T>],
    query: &Point3<T>,
    radius: T,
    metric: Metric,
) -> BTreeSet<usize> {
    let threshold = match metric {
        Metric::L2 => radius * radius,
        Metric::L1 | Metric::Linf => radius,
    };
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| reference_distance(metric, query, p) <= threshold)
        .map(|(i, _)| i)
        .collect()
}

fn assert_prefix_sum_consistent<T: Scalar>(result: &ResultSet<T>, num_queries: usize) {
    let prefix_sum = result.neighbors_prefix_sum();
    assert_eq!(prefix_sum.len(), num_queries);
    if let Some(&first) = prefix_sum.first() {
        assert_eq!(first, 0);
    }
    assert!(prefix_sum.windows(2).all(|w| w[0] <= w[1]));
    if let Some(&last) = prefix_sum.last() {
        assert!(last <= result.neighbors_index().len());
    }
    let total: usize = (0..num_queries).map(|q| result.neighbors(q).len()).sum();
    assert_eq!(total, result.neighbors_index().len());
    if let Some(distances) = result.neighbors_distance() {
        assert_eq!(distances.len(), result.neighbors_index().len());
    }
}

fn assert_close<T: Scalar>(actual: T, expected: T, rtol: f64, atol: f64) {
    let (actual, expected) = (actual.as_f64(), expected.as_f64());
    assert!(
        (actual - expected).abs() <= atol + rtol * expected.abs(),
        "distance {} differs from expected {}",
        actual,
        expected
    );
}

#[allow(clippy::too_many_arguments)]
fn check_search<T: Scalar>(
    seed: u64,
    num_points: usize,
    num_queries: usize,
    radius: f64,
    hash_table_size_factor: f64,
    metric: Metric,
    ignore_query_point: bool,
    return_distances: bool,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<Point3<T>> = random_points(&mut rng, num_points);
    let queries = if ignore_query_point {
        points.clone()
    } else {
        random_points(&mut rng, num_queries)
    };
    let radius = T::from_f64(radius);

    let result = fixed_radius_search(
        &points,
        &queries,
        radius,
        hash_table_size_factor,
        metric,
        ignore_query_point,
        return_distances,
    )
    .unwrap();

    assert_prefix_sum_consistent(&result, queries.len());
    assert_eq!(result.has_distances(), return_distances);

    let (rtol, atol) = match T::DTYPE {
        radius_search::Dtype::Float32 => (1e-6, 1e-7),
        radius_search::Dtype::Float64 => (1e-7, 1e-8),
    };

    for (i, query) in queries.iter().enumerate() {
        let neighbors = result.neighbors(i);
        let found: BTreeSet<usize> = neighbors.iter().copied().collect();
        assert_eq!(found.len(), neighbors.len(), "duplicate neighbors for query {i}");

        let mut expected = brute_force(&points, query, radius, metric);
        if ignore_query_point {
            assert!(expected.remove(&i));
            assert!(!found.contains(&i));
        }
        assert_eq!(
            found, expected,
            "query {i}: metric {metric}, radius {radius}, factor {hash_table_size_factor}"
        );

        if let Some(distances) = result.distances(i) {
            for (&j, &distance) in neighbors.iter().zip(distances) {
                let expected = reference_distance(metric, query, &points[j]);
                assert_close(distance, expected, rtol, atol);
            }
        }
    }
}

fn check_all_configurations<T: Scalar>() {
    let mut seed = 123;
    for (num_points, num_queries) in NUM_POINTS_QUERIES {
        for radius in RADII {
            for factor in HASH_TABLE_SIZE_FACTORS {
                for metric in Metric::ALL {
                    for ignore_query_point in [false, true] {
                        for return_distances in [false, true] {
                            check_search::<T>(
                                seed,
                                num_points,
                                num_queries,
                                radius,
                                factor,
                                metric,
                                ignore_query_point,
                                return_distances,
                            );
                            seed += 1;
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_matches_brute_force_f32() {
    check_all_configurations::<f32>();
}

#[test]
fn test_matches_brute_force_f64() {
    check_all_configurations::<f64>();
}

#[test]
fn test_l2_matches_rtree_oracle() {
    let mut rng = ChaCha8Rng::seed_from_u64(2707);
    let points: Vec<Point3<f64>> = random_points(&mut rng, 2000);
    let queries: Vec<Point3<f64>> = random_points(&mut rng, 500);
    let radius = 0.07;

    let tree = RTree::bulk_load(
        points
            .iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new(p.to_array(), i))
            .collect(),
    );

    let result = fixed_radius_search(&points, &queries, radius, 1.0 / 32.0, Metric::L2, false, false)
        .unwrap();

    for (i, query) in queries.iter().enumerate() {
        let expected: BTreeSet<usize> = tree
            .locate_within_distance(query.to_array(), radius * radius)
            .map(|geom| geom.data)
            .collect();
        let found: BTreeSet<usize> = result.neighbors(i).iter().copied().collect();
        assert_eq!(found, expected, "query {i}");
    }
}

#[test]
fn test_results_invariant_to_hash_table_size() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let points: Vec<Point3<f32>> = random_points(&mut rng, 400);
    let queries: Vec<Point3<f32>> = random_points(&mut rng, 150);

    for metric in Metric::ALL {
        let run = |factor: f64, max_size: usize| {
            RadiusSearch::builder()
                .metric(metric)
                .return_distances(true)
                .sort_neighbors(true)
                .hash_table_size_factor(factor)
                .max_hash_table_size(max_size)
                .build()
                .unwrap()
                .search(&points, &queries, 0.15)
                .unwrap()
        };

        let reference = run(1.0 / 8.0, 1 << 25);
        for (factor, max_size) in [
            (1.0 / 64.0, 1 << 25),
            (1.0, 1 << 25),
            (4.0, 1 << 25),
            (1e-9, 1 << 25),
            (4.0, 1),
            (4.0, 13),
        ] {
            assert_eq!(
                run(factor, max_size),
                reference,
                "metric {metric}, factor {factor}, max size {max_size}"
            );
        }
    }
}

#[test]
fn test_self_exclusion_when_queries_are_points() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let points: Vec<Point3<f64>> = random_points(&mut rng, 300);

    for metric in Metric::ALL {
        let with_self = fixed_radius_search(&points, &points, 0.2, 1.0 / 8.0, metric, false, false)
            .unwrap();
        let without_self =
            fixed_radius_search(&points, &points, 0.2, 1.0 / 8.0, metric, true, false).unwrap();

        for i in 0..points.len() {
            let mut expected: BTreeSet<usize> = with_self.neighbors(i).iter().copied().collect();
            assert!(expected.remove(&i), "query {i} should find itself");
            let found: BTreeSet<usize> = without_self.neighbors(i).iter().copied().collect();
            assert_eq!(found, expected);
        }
    }
}

#[test]
fn test_points_exactly_at_radius_are_included() {
    let origin = Point3::new(0.0_f64, 0.0, 0.0);
    let cases = [
        (
            Metric::L1,
            vec![
                Point3::new(0.25, 0.25, 0.0),
                Point3::new(-0.5, 0.0, 0.0),
                Point3::new(0.125, -0.125, 0.25),
            ],
        ),
        (
            Metric::L2,
            vec![
                Point3::new(0.5, 0.0, 0.0),
                Point3::new(0.0, -0.5, 0.0),
                Point3::new(0.0, 0.0, 0.5),
            ],
        ),
        (
            Metric::Linf,
            vec![
                Point3::new(0.5, 0.5, 0.5),
                Point3::new(-0.5, 0.5, -0.5),
                Point3::new(0.5, -0.25, 0.0),
            ],
        ),
    ];

    for (metric, points) in cases {
        let result =
            fixed_radius_search(&points, &[origin], 0.5, 1.0, metric, false, true).unwrap();
        let found: BTreeSet<usize> = result.neighbors(0).iter().copied().collect();
        assert_eq!(found, BTreeSet::from([0, 1, 2]), "metric {metric}");

        let expected_distance = metric.threshold(0.5);
        for &distance in result.distances(0).unwrap() {
            assert_eq!(distance, expected_distance);
        }
    }
}

#[test]
fn test_l2_distances_are_squared() {
    let points = vec![Point3::new(0.0_f32, 0.0, 0.0), Point3::new(0.5, 0.5, 0.0)];
    let query = [Point3::new(0.0_f32, 0.0, 0.0)];

    let result = RadiusSearch::builder()
        .metric(Metric::L2)
        .return_distances(true)
        .sort_neighbors(true)
        .build()
        .unwrap()
        .search(&points, &query, 1.0)
        .unwrap();

    assert_eq!(result.neighbors(0), &[0, 1]);
    assert_eq!(result.distances(0).unwrap(), &[0.0, 0.5]);
}

#[test]
fn test_neighbor_two_cells_away_after_rounding() {
    // One ulp below a cell face: the query's cell is 0, the point's cell is 2,
    // yet the point is exactly at the radius along x.
    let radius = 0.03125_f32;
    let query = [Point3::new(f32::from_bits(radius.to_bits() - 1), 0.0, 0.0)];
    let points = [Point3::new(0.0625_f32, 0.0, 0.0)];

    for metric in Metric::ALL {
        assert!(metric.within(&query[0], &points[0], radius));
        for factor in [1.0, 8.0, 64.0, 1000.0, 1e6] {
            let result =
                fixed_radius_search(&points, &query, radius, factor, metric, false, true).unwrap();
            assert_eq!(
                result.neighbors(0),
                &[0],
                "metric {metric}, factor {factor}"
            );
            assert_eq!(
                result.distances(0).unwrap(),
                &[reference_distance(metric, &query[0], &points[0])]
            );
        }
    }
}

#[test]
fn test_queries_just_below_cell_faces_match_brute_force() {
    let radius = 0.125_f64;
    let points: Vec<Point3<f64>> = (0..16)
        .map(|i| Point3::new(i as f64 * radius, 0.5, -0.25))
        .collect();
    let queries: Vec<Point3<f64>> = points
        .iter()
        .map(|p| Point3::new(f64::from_bits(p.x.to_bits().saturating_sub(1)), p.y, p.z))
        .collect();

    for metric in Metric::ALL {
        for factor in [1.0 / 8.0, 1.0, 64.0] {
            let result =
                fixed_radius_search(&points, &queries, radius, factor, metric, false, false)
                    .unwrap();
            for (i, query) in queries.iter().enumerate() {
                let found: BTreeSet<usize> = result.neighbors(i).iter().copied().collect();
                assert_eq!(
                    found,
                    brute_force(&points, query, radius, metric),
                    "query {i}, metric {metric}, factor {factor}"
                );
            }
        }
    }
}
