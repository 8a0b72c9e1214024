use radius_search::{Coordinates, Metric, Point3, RadiusSearch, SearchConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see grid statistics)
    env_logger::init();

    println!("=== Radius Search - Getting Started ===\n");

    // A small cloud: a tight cluster plus one outlier
    let points = vec![
        Point3::new(0.0_f32, 0.0, 0.0),
        Point3::new(0.1, 0.0, 0.0),
        Point3::new(0.0, 0.1, 0.05),
        Point3::new(0.15, 0.15, 0.15),
        Point3::new(5.0, 5.0, 5.0),
    ];

    println!("1. Neighbors of every point (L2, excluding itself)");
    println!("--------------------------------------------------");

    let search = RadiusSearch::builder()
        .metric(Metric::L2)
        .ignore_query_point(true)
        .return_distances(true)
        .sort_neighbors(true)
        .build()?;
    let result = search.search(&points, &points, 0.2)?;

    for (query, neighbors, distances) in result.iter() {
        println!(
            "   point {} -> {:?} (squared distances {:?})",
            query,
            neighbors,
            distances.unwrap_or_default()
        );
    }
    println!("   prefix sum: {:?}\n", result.neighbors_prefix_sum());

    println!("2. Comparing metrics");
    println!("--------------------");

    let origin = [Point3::new(0.0_f32, 0.0, 0.0)];
    for metric in Metric::ALL {
        let search = RadiusSearch::builder().metric(metric).build()?;
        let result = search.search(&points, &origin, 0.2)?;
        println!(
            "   {:>4}: {} neighbors of the origin",
            metric.as_str(),
            result.num_neighbors()
        );
    }
    println!();

    println!("3. Runtime-typed buffers");
    println!("------------------------");

    let flat = [0.0_f64, 0.0, 0.0, 0.5, 0.0, 0.0, 3.0, 0.0, 0.0];
    let config = SearchConfig::from_json(r#"{ "metric": "Linf", "return_distances": true }"#)?;
    let result = RadiusSearch::new(config)?.search_dyn(
        Coordinates::from(&flat[..]),
        Coordinates::from(&flat[..]),
        0.5,
    )?;
    println!("   dtype: {}", result.dtype());
    println!("   neighbors_index: {:?}", result.neighbors_index());
    println!("   neighbors_prefix_sum: {:?}", result.neighbors_prefix_sum());

    Ok(())
}
