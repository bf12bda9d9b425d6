//! Lists the closest mosques. Set GEOAPIFY_API_KEY to add Geoapify results.
//!
//! ```text
//! cargo run -p adzan --features async --example nearest_mosque -- -6.2383 106.9756
//! ```

use adzan::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<f64> = std::env::args().skip(1).map(|a| a.parse()).collect::<Result<_, _>>()?;
    let position = match args.as_slice() {
        [lat, lng] => GeoCoordinate::new(*lat, *lng)?,
        _ => GeoCoordinate::new(-6.2383, 106.9756)?,
    };

    let adzan = AdzanClient::new(&ResolverConfig::from_env())?;
    match adzan.nearest_mosques(position).await {
        Ok(mosques) => {
            println!("🕌 {} masjid terdekat dari {}\n", mosques.len(), position);
            for m in &mosques {
                println!("  {:>7}  {}", format_distance(m.distance_km), m.name);
                if !m.address.is_empty() {
                    println!("           {}", m.address);
                }
            }
        }
        Err(e) => eprintln!("❌ {}", e.localized_message()),
    }
    Ok(())
}
