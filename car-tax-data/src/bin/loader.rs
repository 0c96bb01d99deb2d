use std::path::PathBuf;

use anyhow::{Context, Result};
use car_tax_core::{
    CatalogError, DiscountSelection, NavigationError, PreconditionError, TaxCalculator,
};
use car_tax_data::logging::init_tracing;
use car_tax_data::{AppConfig, BracketFileLoader, VehicleFileLoader};
use clap::Parser;
use tracing::{debug, info, warn};

/// Load the vehicle catalog and bracket table, then print the registration
/// tax owed for every vehicle.
///
/// The vehicle file starts with a record count followed by one
/// `make,line,year,price,image` line per vehicle. The bracket file is a
/// properties file with `numero.rangos=N` and `rango1..rangoN` entries of
/// the form `lower,upper,rate`.
#[derive(Parser, Debug)]
#[command(name = "car-tax-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vehicle catalog file (overrides the configuration)
    #[arg(long)]
    vehicles: Option<PathBuf>,

    /// Tax bracket properties file (overrides the configuration)
    #[arg(long)]
    brackets: Option<PathBuf>,

    /// Apply the early-payment discount
    #[arg(long, default_value_t = false)]
    early_payment: bool,

    /// Apply the public-service discount
    #[arg(long, default_value_t = false)]
    public_service: bool,

    /// Apply the account-transfer discount
    #[arg(long, default_value_t = false)]
    account_transfer: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(vehicles) = args.vehicles {
        config.sources.vehicles = vehicles;
    }
    if let Some(brackets) = args.brackets {
        config.sources.brackets = brackets;
    }

    init_tracing(&config.logging.level);
    debug!(?config, "configuration resolved");

    let vehicles = VehicleFileLoader::new(&config.sources.vehicles);
    let brackets = BracketFileLoader::new(&config.sources.brackets);
    let mut calculator = TaxCalculator::load(&vehicles, &brackets, config.discounts)
        .context("Failed to load tax calculator data")?;

    let selection = DiscountSelection {
        early_payment: args.early_payment,
        public_service: args.public_service,
        account_transfer: args.account_transfer,
    };

    info!(
        vehicles = calculator.catalog().len(),
        brackets = calculator.brackets().len(),
        "catalog ready"
    );
    summarize(&calculator)?;

    loop {
        report(&calculator, selection)?;
        match calculator.next() {
            Ok(_) => {}
            Err(CatalogError::Navigation(NavigationError::AtLast)) => break,
            Err(e) => return Err(e).context("Failed to advance the catalog"),
        }
    }

    Ok(())
}

fn summarize(calculator: &TaxCalculator) -> Result<()> {
    let average = calculator
        .average_price()
        .context("Failed to compute the average price")?;
    println!("Average price: {average}");

    if let Some(vehicle) = calculator.find_most_expensive() {
        println!(
            "Most expensive: {} {} ({})",
            vehicle.make(),
            vehicle.line(),
            vehicle.price()
        );
    }

    let oldest = calculator
        .find_oldest()
        .context("Failed to find the oldest vehicle")?;
    println!(
        "Oldest: {} {} ({})",
        oldest.make(),
        oldest.line(),
        oldest.year()
    );

    Ok(())
}

fn report(
    calculator: &TaxCalculator,
    selection: DiscountSelection,
) -> Result<()> {
    let vehicle = calculator.current()?;

    match calculator.calculate(selection) {
        Ok(breakdown) => println!(
            "{:>3}. {} {} {} price {} rate {}% payment {}",
            calculator.catalog().position() + 1,
            vehicle.make(),
            vehicle.line(),
            vehicle.year(),
            breakdown.price,
            breakdown.bracket.rate_percent(),
            breakdown.payment
        ),
        Err(PreconditionError::NoMatchingBracket { price }) => {
            warn!(
                make = vehicle.make(),
                line = vehicle.line(),
                %price,
                "no tax bracket covers this vehicle"
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
