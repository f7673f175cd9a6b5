//! Pipeline driver: fetch, normalize, merge, export

use clap::Parser;

use crate::services::{exporter, merge, normalize_records, ApiClient};

/// Fetch Numberland API data, merge it, and snapshot the result
#[derive(Parser)]
#[command(name = "numex")]
#[command(version, about, long_about = None)]
pub struct Cli {}

impl Cli {
    /// Run the full pipeline: three sequential fetches, normalization,
    /// the id merge, then the snapshot export.
    pub fn run(self) -> anyhow::Result<()> {
        let client = ApiClient::new()?;

        println!("Fetching getservice...");
        let services = normalize_records(client.call("getservice", &[])?);
        println!("Fetching getcountry...");
        let countries = normalize_records(client.call("getcountry", &[])?);
        println!("Fetching getinfo...");
        let info = normalize_records(client.call("getinfo", &[("operator", ""), ("country", "")])?);

        let merged = merge(&services, &countries, &info);
        let dir = exporter::output_dir()?;

        #[cfg(feature = "xlsx")]
        {
            let stamp = exporter::RunStamp::now();
            let outcome = exporter::xlsx::export(&merged, &stamp, &dir)?;
            println!(
                "Saved: {} ({} total rows, {} new)",
                outcome.path.display(),
                outcome.total_rows,
                outcome.new_rows
            );
        }

        #[cfg(not(feature = "xlsx"))]
        {
            let path = exporter::json::export(&merged, &dir)?;
            println!("Spreadsheet output not built in. Saved JSON: {}", path.display());
            println!("Rebuild with the default `xlsx` feature for styled snapshots.");
        }

        Ok(())
    }
}
