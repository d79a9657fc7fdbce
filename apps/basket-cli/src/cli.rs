use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::{CliConfig, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "basket")]
#[command(about = "Price a shopping cart from a JSON list of line items")]
#[command(version)]
pub struct Args {
    /// Cart display name (overrides BASKET_CART_NAME)
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Output format (overrides BASKET_OUTPUT)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable debug logging (overrides BASKET_VERBOSE)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print cart totals and the grand total
    Totals(CartInput),
    /// Print every line item with its derived fields
    Items(CartInput),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CartInput {
    /// JSON file holding an array of item specs
    pub file: PathBuf,

    /// Remove the item with this id after loading (repeatable)
    #[arg(short, long = "remove", value_name = "ID")]
    pub remove: Vec<u64>,
}

impl Args {
    /// Applies flag overrides on top of the environment configuration.
    pub fn apply(&self, mut config: CliConfig) -> CliConfig {
        if let Some(name) = &self.name {
            config.cart_name = name.clone();
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.verbose {
            config.verbose = true;
        }
        config
    }

}

impl Commands {
    /// The spec file and removals shared by every subcommand.
    pub fn input(&self) -> &CartInput {
        match self {
            Commands::Totals(input) | Commands::Items(input) => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_totals_with_removals() {
        let args = Args::try_parse_from([
            "basket", "totals", "cart.json", "--remove", "2", "-r", "5",
        ])
        .unwrap();

        assert!(matches!(args.command, Commands::Totals(_)));
        assert_eq!(args.command.input().file, PathBuf::from("cart.json"));
        assert_eq!(args.command.input().remove, vec![2, 5]);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "basket", "items", "cart.json", "--output", "json", "--name", "lane-1", "-v",
        ])
        .unwrap();

        let config = args.apply(CliConfig::default());
        assert_eq!(config.cart_name, "lane-1");
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let args = Args::try_parse_from(["basket", "totals", "cart.json"]).unwrap();
        let env_config = CliConfig {
            cart_name: "from-env".to_string(),
            output: OutputFormat::Json,
            verbose: false,
        };

        assert_eq!(args.apply(env_config.clone()), env_config);
    }
}
