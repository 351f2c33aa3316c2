use gisdb::{Gis, GisError, render};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see detailed logs)
    env_logger::init();

    println!("=== gisdb - Getting Started ===\n");

    let mut db = Gis::new();
    println!("✓ Created in-memory database\n");

    // === INSERTION ===
    println!("1. Inserting cities");
    println!("-------------------");

    for (name, x, y) in [
        ("Richmond", 10, 10),
        ("Tappahannock", 5, 5),
        ("Abingdon", 6, 7),
        ("Bristol", 4, 5),
        ("Petersburg", 3, 4),
    ] {
        db.insert(name, x, y)?;
        println!("   Inserted {} ({}, {})", name, x, y);
    }

    match db.insert("Usurper", 10, 10) {
        Err(GisError::DuplicateCoordinate { x, y }) => {
            println!("   Refused second record at ({}, {})", x, y)
        }
        other => println!("   Unexpected outcome: {:?}", other),
    }
    println!();

    // === DIAGNOSTIC DUMPS ===
    println!("2. Spatial index (inorder with levels)");
    println!("--------------------------------------");
    print!("{}", render(&db.spatial_levels()));
    println!();

    println!("3. Name index (inorder with levels)");
    println!("-----------------------------------");
    print!("{}", render(&db.name_levels()));
    println!();

    // === RANGE SEARCH ===
    println!("4. Range search");
    println!("---------------");
    for radius in [4, 5] {
        let result = db.search(0, 0, radius)?;
        println!(
            "   radius {}: {} match(es), {} node(s) visited",
            radius,
            result.cities.len(),
            result.visited
        );
        for city in &result.cities {
            println!("     - {}", city);
        }
    }
    println!();

    // === DELETION ===
    println!("5. Deletion");
    println!("-----------");
    let removal = db.delete_at(5, 5)?;
    if let Some(city) = &removal.removed {
        println!("   Removed {} after visiting {} node(s)", city, removal.visited);
    }
    print!("{}", render(&db.spatial_levels()));

    for city in db.delete_by_name("Petersburg") {
        println!("   Removed {}", city);
    }
    println!();

    let stats = db.stats();
    println!("Records left: {}", stats.record_count);
    println!("Operations performed: {}", stats.operations_count);

    Ok(())
}
