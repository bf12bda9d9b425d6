//! Resolve today's schedule and print the live countdown for a few seconds.
//!
//! ```text
//! cargo run -p adzan --features async --example next_prayer -- -6.2383 106.9756
//! ```

use std::time::Duration;

use adzan::prelude::*;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let position = parse_position()?;
    let adzan = AdzanClient::new(&ResolverConfig::from_env())?;

    let location = adzan.locate(position).await;
    let today = chrono::Local::now().date_naive();
    let day = adzan.schedule().load_day(&location, today).await?;

    println!("=====================================");
    println!("  🕌 JADWAL SHOLAT - {}", day.location.label);
    println!("=====================================");
    for (prayer, time) in day.today.rows() {
        println!("  {:<8} {}", prayer.label(), time.unwrap_or("--:--"));
    }
    println!("-------------------------------------");
    println!("  {}", day.quote());
    println!("=====================================\n");

    let (_tx, rx) = watch::channel(day);
    let ticker = spawn_prayer_ticker(rx, SystemClock, |tick: Tick| {
        if let Some(next) = &tick.next {
            let when = if next.is_tomorrow { " (besok)" } else { "" };
            println!("  {} {}{} - {}", next.label(), next.time, when, next.countdown());
        }
        if let Some(alert) = tick.alert {
            println!("\n🔔 {}\n{}\n", alert.title, alert.message);
        }
    });

    tokio::time::sleep(Duration::from_secs(5)).await;
    ticker.stop();
    Ok(())
}

/// `lat lng` from the command line; none means location access was denied.
fn parse_position() -> anyhow::Result<Option<GeoCoordinate>> {
    let args: Vec<f64> = std::env::args().skip(1).map(|a| a.parse()).collect::<Result<_, _>>()?;
    match args.as_slice() {
        [] => Ok(None),
        [lat, lng] => Ok(Some(GeoCoordinate::new(*lat, *lng)?)),
        _ => anyhow::bail!("usage: next_prayer [LAT LNG]"),
    }
}
