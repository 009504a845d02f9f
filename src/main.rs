// Copyright (c) 2025 Relevamiento CPC
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use relevador::application::export;
use relevador::application::progress::TracingProgress;
use relevador::application::relevamiento::Relevamiento;
use relevador::config::settings::Settings;
use relevador::utils::telemetry;
use std::path::PathBuf;
use tracing::{info, warn};

/// Entry point: load configuration, run the survey, write the CSV
/// report and its summary.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();
    info!("Starting relevador...");

    let settings = Settings::new()?;
    info!("Configuration loaded");

    let relevamiento = Relevamiento::new(&settings);

    // Ctrl-C requests a graceful stop between site scans
    let cancel = relevamiento.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; finishing the scan in flight");
            cancel.cancel();
        }
    });

    let records = relevamiento.run(&TracingProgress).await?;
    info!("Survey finished with {} records", records.len());

    std::fs::create_dir_all(&settings.export.output_dir)?;
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let output_dir = PathBuf::from(&settings.export.output_dir);

    let report_path = output_dir.join(format!("relevamiento_cpc_{}.csv", stamp));
    export::write_csv(
        &report_path,
        &export::report_header(),
        &export::build_rows(&records),
    )?;
    info!("Report written to {}", report_path.display());

    let summary_path = output_dir.join(format!("resumen_cpc_{}.csv", stamp));
    export::write_summary_csv(&summary_path, &export::build_summary(&records))?;
    info!("Summary written to {}", summary_path.display());

    Ok(())
}
