use clap::Parser;
use rainharvest::{Config, UseType};
use tracing::instrument;

use super::terminal::{Colorize, grouped, rupees};

#[derive(Debug, Parser)]
#[command(about = "Show system cost tiers by tank capacity")]
pub struct Tiers {
    /// Only show tiers for this installation type
    #[arg(long = "use", value_name = "TYPE")]
    use_type: Option<UseType>,
}

impl Tiers {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) {
        let selected: Vec<UseType> = match self.use_type {
            Some(use_type) => vec![use_type],
            None => vec![UseType::Household, UseType::Commercial],
        };

        for (i, use_type) in selected.into_iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{use_type}");
            println!("{}", "─".repeat(use_type.as_str().len()).dim());

            let mut lower: Option<f64> = None;
            for tier in config.tiers(use_type).iter() {
                let range = match (lower, tier.up_to) {
                    (None, Some(upper)) => format!("≤ {} L", grouped(upper)),
                    (Some(lower), Some(upper)) => {
                        format!("> {} L, ≤ {} L", grouped(lower), grouped(upper))
                    }
                    (Some(lower), None) => format!("> {} L", grouped(lower)),
                    (None, None) => "any capacity".to_string(),
                };
                println!("  {range:<28} {:>12}", rupees(tier.cost));
                lower = tier.up_to.or(lower);
            }
        }
    }
}
