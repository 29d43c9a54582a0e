use place_data::PlaceIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_path = Path::new("data/places");

    println!("Loading place snapshots from {}...\n", data_path.display());

    let start = Instant::now();
    let index = PlaceIndex::load(data_path).expect("Failed to load snapshots");
    let elapsed = start.elapsed();

    let with_coordinates = index
        .places()
        .iter()
        .filter(|p| p.position().is_some())
        .count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Places: {}", index.len());
    println!("With coordinates: {}", with_coordinates);
    println!("Categories: {}", index.categories().join(", "));
    println!("\nPerformance: {:.0} places/second",
             index.len() as f64 / elapsed.as_secs_f64());
}
