//! Qibla bearing for a position, with an optional compass heading.
//!
//! ```text
//! cargo run -p adzan --features async --example qibla_direction -- -6.2 106.8 250
//! ```

use adzan::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<f64> = std::env::args().skip(1).map(|a| a.parse()).collect::<Result<_, _>>()?;
    let (position, heading) = match args.as_slice() {
        [lat, lng] => (GeoCoordinate::new(*lat, *lng)?, None),
        [lat, lng, heading] => (GeoCoordinate::new(*lat, *lng)?, Some(*heading)),
        _ => (GeoCoordinate::new(-6.2088, 106.8456)?, None),
    };

    let adzan = AdzanClient::new(&ResolverConfig::from_env())?;
    println!("📍 Posisi   : {}", position);
    println!("🧭 Lokal    : {}", adzan.qibla().local(position));

    let bearing = adzan.qibla_bearing(position, None).await;
    let source = match bearing.source {
        BearingSource::Api => "API",
        BearingSource::Local => "perhitungan lokal",
    };
    println!("🕋 Kiblat   : {} ({})", bearing, source);

    if let Some(heading) = select_heading(heading, None) {
        println!("   Jarum    : {:.0}°", pointer_rotation(bearing.degrees, heading));
        println!("   {}", rotation_guide(bearing.degrees, heading));
    }
    Ok(())
}
