use anyhow::Result;
use log::info;
use std::env;

use tourist_tax::data;
use tourist_tax::report::{self, SeriesFilter};
use tourist_tax::survey::EntityKind;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: cargo run -- <territory|age_gender> <input_file>");
        std::process::exit(1);
    }

    let entities = data::read_csv_path(&args[2], &args[1])?;
    info!("aggregated {} entities from {}", entities.len(), args[2]);

    data::export_csv(&entities, std::io::stdout())?;

    let mut territories = Vec::new();
    let mut groups = Vec::new();
    for entity in entities {
        match entity.kind() {
            EntityKind::Territory => territories.extend(entity.into_territory()),
            EntityKind::AgeGender => groups.extend(entity.into_age_gender()),
        }
    }

    if let Some(highest) = report::highest_percentage(&territories) {
        info!("highest purpose percentage across territories: {}", highest);
    }
    for average in report::purpose_averages(&territories).into_iter().filter(|a| a.samples > 0) {
        if let Some(value) = average.average {
            info!("{} average={} samples={}", average.abbreviation, value.round_dp(2), average.samples);
        }
    }

    if !groups.is_empty() {
        let series = report::age_gender_series(&groups, SeriesFilter::default());
        info!("{} age and gender series points", series.len());
    }

    Ok(())
}
