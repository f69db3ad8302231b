mod bootstrap;

use anyhow::Result;
use clickrank_core::formatting::render_report;
use clickrank_core::settings::Settings;
use clickrank_data::analysis::analyze_clicks;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("clickrank v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Registry: {}, Events: {}, Year: {}",
        settings.encodes.display(),
        settings.decodes.display(),
        settings.year
    );

    let report = run(&settings)?;
    println!("{}", report);

    Ok(())
}

/// Run the analysis and render the ranking, or with `full` the ranking
/// together with the run metadata. Nothing is rendered when any stage fails.
fn run(settings: &Settings) -> Result<String> {
    let result = analyze_clicks(&settings.encodes, &settings.decodes, settings.year)?;

    tracing::debug!(
        "Loaded in {:.3}s, aggregated in {:.3}s",
        result.metadata.load_time_seconds,
        result.metadata.aggregate_time_seconds
    );

    match settings.format.as_str() {
        "full" => Ok(serde_json::to_string_pretty(&result)?),
        format => Ok(render_report(&result.ranking, format)?),
    }
}
