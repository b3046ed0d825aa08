use clap::Parser;
use rainharvest::{
    Config, Estimator, ResultSet, RoofType, UseType, UserInput, WaterSource,
    domain::BillCategory,
};
use tracing::instrument;

use super::terminal::{Colorize, grouped, is_narrow, rupees};

#[derive(Debug, Parser)]
#[command(about = "Estimate rainwater collection, system cost and payback")]
pub struct Estimate {
    /// Rooftop catchment area in square metres
    #[arg(long, value_name = "M2")]
    area: f64,

    /// Roof profile (flat, sloped)
    #[arg(long, value_name = "TYPE", default_value = "flat")]
    roof: RoofType,

    /// Storage tank capacity in litres
    #[arg(long, value_name = "LITRES")]
    tank: f64,

    /// Installation type (household, commercial)
    #[arg(long = "use", value_name = "TYPE", default_value = "household")]
    use_type: UseType,

    /// Current water source (municipality, submersible, tubewell, well)
    #[arg(long, value_name = "SOURCE", default_value = "municipality")]
    source: WaterSource,

    /// Current monthly water bill (₹)
    #[arg(long, value_name = "AMOUNT", default_value_t = 2500.0)]
    water_bill: f64,

    /// Current monthly electricity bill (₹)
    #[arg(long, value_name = "AMOUNT", default_value_t = 1800.0)]
    electricity_bill: f64,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Estimate {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let input = UserInput::new(
            self.area,
            self.roof,
            self.tank,
            self.use_type,
            self.source,
            self.water_bill,
            self.electricity_bill,
        )?;

        let result = Estimator::new(config).estimate(&input);

        match self.output {
            OutputFormat::Json => Self::output_json(&input, &result)?,
            OutputFormat::Table if self.quiet => Self::output_quiet(&result),
            OutputFormat::Table => Self::output_table(&input, &result),
        }
        Ok(())
    }

    fn output_json(input: &UserInput, result: &ResultSet) -> anyhow::Result<()> {
        let output = json_document(input, result);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(result: &ResultSet) {
        let payback =
            |years: Option<f64>| years.map_or_else(|| "none".to_string(), |y| format!("{y:.1}"));
        println!(
            "annual_litres={:.1} annual_savings={:.2} system_cost={:.0} overview_payback={} cost_payback={} carbon_kg={:.0}",
            result.collection.annual_liters,
            result.annual_savings,
            result.system_cost,
            payback(result.overview_payback_years.as_option()),
            payback(result.cost_comparison_payback_years.as_option()),
            result.carbon_offset_kg,
        );
    }

    fn output_table(input: &UserInput, result: &ResultSet) {
        let narrow = is_narrow();
        let row = |label: &str, value: String| {
            if narrow {
                println!("{label}:\n  {value}");
            } else {
                println!("  {label:<28} {value}");
            }
        };

        println!("Collection");
        println!("{}", "──────────".dim());
        row(
            "Roof efficiency",
            format!("{:.0}%", result.collection.efficiency * 100.0),
        );
        row(
            "Annual collection",
            format!("{} L", grouped(result.collection.annual_liters)),
        );
        row(
            "Monthly collection",
            format!("{} L", grouped(result.collection.monthly_liters)),
        );
        row(
            "Daily collection",
            format!("{} L", grouped(result.collection.daily_liters)),
        );
        let storage = if result.tank_storage_days.is_finite() {
            format!("{:.1} days", result.tank_storage_days)
        } else {
            "not calculable".dim()
        };
        row("Tank holds", storage);
        row(
            "Carbon offset",
            format!("{} kg CO₂/year", grouped(result.carbon_offset_kg)),
        );

        println!();
        println!("Overview");
        println!("{}", "────────".dim());
        row("Annual savings", rupees(result.annual_savings));
        row(
            &format!("System cost ({})", input.use_type),
            rupees(result.system_cost),
        );
        row("Payback", payback(result.overview_payback_years));

        let comparison = &result.cost_comparison;
        println!();
        println!("Cost comparison ({})", input.water_source);
        println!("{}", "───────────────".dim());
        if !narrow {
            println!("  {:<28} {:>12} {:>12}", "", "Current", "With RWH");
        }
        for entry in &comparison.monthly {
            let label = match entry.category {
                BillCategory::Water => "Monthly water bill",
                BillCategory::Electricity => "Monthly electricity bill",
                BillCategory::Total => "Monthly total",
            };
            if narrow {
                println!("{label}: {} -> {}", rupees(entry.current), rupees(entry.with_rwh));
            } else {
                println!(
                    "  {label:<28} {:>12} {:>12}",
                    rupees(entry.current),
                    rupees(entry.with_rwh)
                );
            }
        }
        row("Current annual cost", rupees(comparison.total_current_cost));
        row(
            "Annual savings",
            rupees(comparison.total_annual_savings).success(),
        );
        row("Remaining annual cost", rupees(comparison.remaining_annual_cost));
        row("Payback", payback(result.cost_comparison_payback_years));
        row("Annual return", format!("{:.0}%", result.annual_return_pct));

        println!();
        println!("Projection");
        println!("{}", "──────────".dim());
        for entry in &result.projection {
            let marker = if entry.break_even {
                "✅".to_string()
            } else {
                "–".dim()
            };
            println!(
                "  Year {:<3} {:>14} {:>14} {marker}",
                entry.year,
                rupees(entry.cumulative_savings),
                rupees(entry.net_savings)
            );
        }
        match result.break_even_year() {
            Some(year) => println!("{}", format!("Breaks even in year {year}.").info()),
            None => println!(
                "{}",
                "Does not break even within the projection.".warning()
            ),
        }

        println!();
        for summary in &result.lifetime {
            row(
                &format!("{}-year savings / net", summary.years),
                format!(
                    "{} / {}",
                    rupees(summary.total_savings),
                    rupees(summary.net_profit)
                ),
            );
        }
    }
}

fn json_document(input: &UserInput, result: &ResultSet) -> serde_json::Value {
    serde_json::json!({
        "input": input,
        "result": result,
        "break_even_year": result.break_even_year(),
    })
}

fn payback(payback: rainharvest::Payback) -> String {
    if payback.is_calculable() {
        payback.to_string()
    } else {
        payback.to_string().warning()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_document_uses_one_key_casing() {
        let input = UserInput::new(
            100.0,
            RoofType::Flat,
            5000.0,
            UseType::Household,
            WaterSource::Municipality,
            2500.0,
            1800.0,
        )
        .unwrap();
        let result = Estimator::new(Config::default()).estimate(&input);

        let document = json_document(&input, &result);

        assert_eq!(document["input"]["tank_capacity_liters"], 5000.0);
        assert_eq!(document["input"]["use_type"], "household");
        assert_eq!(document["result"]["system_cost"], 80_000.0);
        assert_eq!(document["break_even_year"], 6);

        let mut pending = vec![&document];
        while let Some(value) = pending.pop() {
            match value {
                serde_json::Value::Object(map) => {
                    for (key, nested) in map {
                        assert!(
                            !key.chars().any(char::is_uppercase),
                            "key {key} is not snake_case"
                        );
                        pending.push(nested);
                    }
                }
                serde_json::Value::Array(items) => pending.extend(items),
                _ => {}
            }
        }
    }
}
