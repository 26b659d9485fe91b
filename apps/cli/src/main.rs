#![deny(warnings)]

//! Headless CLI: builds a session, applies parameters, lets the rotation
//! timer run for a few ticks and prints the resulting state.

use anyhow::{Context, Result};
use earth_core::{default_catalog, Catalog, SystemId, TracingSink};
use earth_runtime::{run_event_loop, session_channel, RotationScheduler, Session, SessionConfig};
use earth_sim::{format_large_number, run_scenario, ImpactKind, RawParameters};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    catalog: Option<String>,
    select: Option<String>,
    temperature: Option<String>,
    co2: Option<String>,
    deforestation: Option<String>,
    ticks: u64,
    period_ms: Option<u64>,
    scenario: bool,
    json: bool,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = it.next(),
            "--catalog" => args.catalog = it.next(),
            "--select" => args.select = it.next(),
            "--temperature" => args.temperature = it.next(),
            "--co2" => args.co2 = it.next(),
            "--deforestation" => args.deforestation = it.next(),
            "--ticks" => args.ticks = it.next().and_then(|s| s.parse().ok()).unwrap_or(0),
            "--period-ms" => args.period_ms = it.next().and_then(|s| s.parse().ok()),
            "--scenario" => args.scenario = true,
            "--json" => args.json = true,
            _ => {}
        }
    }
    args
}

fn print_summary(session: &Session<TracingSink>) {
    let snap = session.snapshot();
    let graph = session.graph();
    match graph.selected() {
        Some(s) => println!("Selected | {} {} ({})", s.icon, s.name, s.id),
        None => println!("Selected | none"),
    }
    for c in &snap.graph.connections {
        println!(
            "  -> {:<14} length {:>7.1}px  angle {:>7.1}°",
            c.to.as_str(),
            c.style.length,
            c.style.angle_deg
        );
    }
    let p = snap.parameters;
    println!(
        "Parameters | temperature {:+.2}°C | CO₂ {} ppm | deforestation {}%",
        p.temperature, p.co2, p.deforestation_rate
    );
    for m in &snap.impacts {
        println!("  {} {:<24} {}", m.icon.as_deref().unwrap_or(" "), m.label, m.value);
    }
    let displaced = ImpactKind::ClimateRefugees.amount(&p) as f64 * 1e6;
    println!("  displaced people (headcount): {}", format_large_number(displaced));
    let series = session.chart().series();
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        println!(
            "History | {:?} | {} points {}–{} | temperature {:.2} → {:.2}°C",
            snap.series_source,
            series.len(),
            first.year,
            last.year,
            first.temperature,
            last.temperature
        );
    }
    if let Some(title) = &snap.story_title {
        println!("Story | {}", title);
    }
    println!("Ticks | {}", snap.ticks);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args();
    info!(?args, "starting CLI");

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path).with_context(|| format!("loading config {path}"))?,
        None => SessionConfig::default(),
    };
    if let Some(ms) = args.period_ms {
        config.rotation_period_ms = ms;
    }
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path).with_context(|| format!("loading catalog {path}"))?,
        None => default_catalog(),
    };

    let mut session = Session::new(catalog, &config, TracingSink);
    if args.temperature.is_some() || args.co2.is_some() || args.deforestation.is_some() {
        session.set_raw_parameters(RawParameters {
            temperature: args.temperature.as_deref(),
            co2: args.co2.as_deref(),
            deforestation_rate: args.deforestation.as_deref(),
        });
    }
    if let Some(id) = &args.select {
        session.select(Some(&SystemId::new(id.as_str())));
    }

    if args.ticks > 0 {
        let (handle, mut events) = session_channel(16);
        let mut scheduler = RotationScheduler::start(config.rotation_period(), handle.sender());
        run_event_loop(&mut session, &mut events, Some(args.ticks)).await;
        scheduler.stop().await;
    }

    if args.json {
        println!("{}", session.snapshot().to_json_pretty()?);
    } else {
        print_summary(&session);
    }

    if args.scenario {
        let projection = run_scenario(session.parameters().temperature);
        println!("Scenario | +{:.2}°C by 2100", projection.temperature);
        for point in &projection.timeline {
            println!(
                "  {} | {:>5.2}°C | {:>6.2} mm",
                point.year, point.temperature, point.sea_level
            );
        }
    }

    Ok(())
}
