use clap::Parser;
use rainharvest::domain::WeatherProfile;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Show the placeholder weather profile")]
pub struct Weather {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Weather {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let profile = WeatherProfile::placeholder();

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
            OutputFormat::Table => Self::output_table(&profile),
        }
        Ok(())
    }

    fn output_table(profile: &WeatherProfile) {
        println!("{}", "Placeholder figures, not live weather data.".dim());
        println!();
        println!("  Annual rainfall     {} mm", profile.annual_rainfall_mm);
        println!("  Groundwater level   {} m", profile.groundwater_level_m);
        println!("  Climate zone        {}", profile.climate_zone);
        println!("  Monsoon season      {}", profile.monsoon_season);
        println!("  Avg temperature     {} °C", profile.average_temperature_c);
        println!("  Avg humidity        {}%", profile.humidity_pct);
        println!("  Wind speed          {} km/h", profile.wind_speed_kmh);
        println!("  Minerals            {}", profile.minerals.join(", "));

        let carbon = profile.carbon_footprint;
        println!(
            "  Carbon footprint    {} → {} t CO₂/year ({}% less)",
            carbon.current_tonnes, carbon.with_rwh_tonnes, carbon.reduction_pct
        );

        println!();
        println!("  {:<5} {:>8} {:>10}", "Month", "Rain mm", "Collection");
        let peak = profile.peak_month().month;
        for month in profile.monthly {
            let line = format!(
                "  {:<5} {:>8} {:>10}",
                month.month, month.rainfall_mm, month.collection
            );
            if month.month == peak {
                println!("{}", line.info());
            } else {
                println!("{line}");
            }
        }
    }
}
