//! Basic example demonstrating the Flair API client.
//!
//! Run with:
//! ```
//! FLAIR_CLIENT_ID=id FLAIR_CLIENT_SECRET=secret cargo run --example basic
//! ```

use flair_api::{FlairClient, Get, List, Room, Structure, Vent};

#[tokio::main]
async fn main() -> flair_api::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating Flair client...");
    let client = FlairClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Structures ---");
    let structures = Structure::list(&client).await?;
    println!("Found {} structures", structures.len());
    for structure in &structures {
        println!(
            "  - {} ({}) mode: {}",
            structure.attrs().name.as_deref().unwrap_or("unnamed"),
            structure.id().unwrap_or("?"),
            structure
                .attrs()
                .structure_heat_cool_mode
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "unknown".to_string()),
        );
    }

    let Some(home) = structures.iter().find(|s| s.is_primary_home()).or(structures.first()) else {
        return Ok(());
    };

    println!("\n--- Rooms ---");
    let rooms: Vec<Room> = Room::list(&client)
        .await?
        .into_iter()
        .filter(|room| room.structure_id() == home.id())
        .collect();
    for room in &rooms {
        println!(
            "  - {}: {:?} °C, set point {:?} °C",
            room.attrs().name.as_deref().unwrap_or("unnamed"),
            room.attrs().current_temperature_c,
            room.attrs().set_point_c,
        );
    }

    println!("\n--- Vents ---");
    let vents = Vent::list(&client).await?;
    for vent in vents.iter().take(5) {
        println!(
            "  - {} in room {}: {}% open",
            vent.attrs().name.as_deref().unwrap_or("unnamed"),
            vent.room_id().unwrap_or("-"),
            vent.attrs().percent_open.unwrap_or(0.0),
        );
    }

    if let Some(first) = vents.first().and_then(|v| v.id()) {
        println!("\n--- Vent Reading ---");
        let mut vent = Vent::get(&client, first.to_string()).await?;
        vent.refresh_reading().await?;
        println!("  Duct temperature: {:?} °C", vent.attrs().duct_temperature_c);
        println!("  Duct pressure: {:?}", vent.attrs().duct_pressure);
    }

    println!("\nDone!");
    Ok(())
}
