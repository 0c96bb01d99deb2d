//! Integration tests that load the on-disk fixtures and drive a calculator
//! through them end to end.

use std::path::PathBuf;

use car_tax_core::{
    BracketLoader, CatalogError, DiscountPolicy, DiscountSelection, LoadError, NavigationError,
    TaxCalculator, VehicleLoader,
};
use car_tax_data::{AppConfig, BracketFileLoader, VehicleFileLoader};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_calculator() -> TaxCalculator {
    TaxCalculator::load(
        &VehicleFileLoader::new(fixture("vehiculos.txt")),
        &BracketFileLoader::new(fixture("impuestos.properties")),
        DiscountPolicy::default(),
    )
    .expect("fixtures should load")
}

#[test]
fn test_load_fixture_vehicles() {
    let vehicles = VehicleFileLoader::new(fixture("vehiculos.txt"))
        .load_vehicles()
        .expect("fixture file should load without error");

    // The fixture announces 4 records and carries one extra line.
    assert_eq!(vehicles.len(), 4);
    assert_eq!(vehicles[0].make(), "Mazda");
    assert_eq!(vehicles[0].line(), "Allegro");
    assert_eq!(vehicles[0].price(), dec!(28000000));
    assert_eq!(vehicles[3].image_ref(), "logan.jpg");
}

#[test]
fn test_load_fixture_brackets() {
    let brackets = BracketFileLoader::new(fixture("impuestos.properties"))
        .load_brackets()
        .expect("fixture file should load without error");

    assert_eq!(brackets.len(), 3);
    assert_eq!(brackets[0].rate_percent(), dec!(1.5));
    // rango2 spans three physical lines.
    assert_eq!(brackets[1].lower_bound(), dec!(30000000));
    assert_eq!(brackets[1].upper_bound(), dec!(70000000));
    assert_eq!(brackets[1].rate_percent(), dec!(2.0));
    // rango3 uses a whitespace separator and scientific notation.
    assert_eq!(brackets[2].lower_bound(), dec!(70000000));
    assert_eq!(brackets[2].upper_bound(), dec!(200000000));
}

#[test]
fn test_missing_bracket_key_is_reported() {
    let err = BracketFileLoader::new(fixture("short.properties"))
        .load_brackets()
        .expect_err("rango2 is absent");

    assert_eq!(err, LoadError::MissingKey("rango2".to_string()));
}

#[test]
fn test_truncated_vehicle_file_is_reported() {
    let err = VehicleFileLoader::new(fixture("truncated-vehiculos.txt"))
        .load_vehicles()
        .expect_err("two records are missing");

    assert_eq!(
        err,
        LoadError::MissingRecords {
            expected: 3,
            found: 1,
        }
    );
}

#[test]
fn test_empty_vehicle_file_cannot_build_calculator() {
    struct NoVehicles;

    impl VehicleLoader for NoVehicles {
        fn load_vehicles(&self) -> Result<Vec<car_tax_core::Vehicle>, LoadError> {
            VehicleFileLoader::parse("0\n".as_bytes())
        }
    }

    let result = TaxCalculator::load(
        &NoVehicles,
        &BracketFileLoader::new(fixture("impuestos.properties")),
        DiscountPolicy::default(),
    );

    assert!(matches!(result, Err(LoadError::EmptyCatalog)));
}

#[test]
fn test_payment_for_first_vehicle() {
    let calculator = fixture_calculator();

    // 28,000,000 falls in the 1.5% bracket.
    assert_eq!(
        calculator.compute_payment(DiscountSelection::none()),
        Ok(dec!(420000))
    );
    // 420,000 -> 378,000 -> 328,000 -> 311,600
    assert_eq!(
        calculator.compute_payment(DiscountSelection::all()),
        Ok(dec!(311600))
    );
}

#[test]
fn test_walk_catalog_computes_each_payment() {
    let mut calculator = fixture_calculator();
    let mut payments = vec![
        calculator
            .compute_payment(DiscountSelection::none())
            .expect("first vehicle has a bracket"),
    ];

    loop {
        match calculator.next() {
            Ok(_) => payments.push(
                calculator
                    .compute_payment(DiscountSelection::none())
                    .expect("every fixture vehicle has a bracket"),
            ),
            Err(err) => {
                assert_eq!(err, CatalogError::Navigation(NavigationError::AtLast));
                break;
            }
        }
    }

    assert_eq!(
        payments,
        vec![dec!(420000), dec!(900000), dec!(2300000), dec!(225000)]
    );
    assert_eq!(calculator.catalog().position(), 3);
}

#[test]
fn test_searches_over_fixture_catalog() {
    let calculator = fixture_calculator();

    let most_expensive = calculator
        .find_most_expensive()
        .expect("catalog is not empty");
    assert_eq!(most_expensive.line(), "CX-5");

    // Case-insensitive, last match wins.
    let mazda = calculator.find_by_make("MAZDA").expect("two Mazdas");
    assert_eq!(mazda.line(), "CX-5");

    assert_eq!(
        calculator.find_by_line("corolla").map(|v| v.make()),
        Some("Toyota")
    );
    assert!(calculator.find_by_make("Tesla").is_none());

    // Two vehicles from 1998; the first one wins.
    let oldest = calculator.find_oldest().expect("catalog is not empty");
    assert_eq!(oldest.line(), "Corolla");

    assert_eq!(calculator.average_price(), Ok(dec!(45000000)));

    // None of the searches moved the cursor.
    assert_eq!(calculator.catalog().position(), 0);
}

#[test]
fn test_config_fixture_drives_loading() {
    let config = AppConfig::load(&fixture("car-tax.toml")).expect("fixture config is valid");
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let calculator = TaxCalculator::load(
        &VehicleFileLoader::new(root.join(&config.sources.vehicles)),
        &BracketFileLoader::new(root.join(&config.sources.brackets)),
        config.discounts,
    )
    .expect("configured sources should load");

    assert_eq!(config.discounts.public_service_amount, dec!(100000));
    // 420,000 -> 378,000 -> 278,000 -> 264,100
    assert_eq!(
        calculator.compute_payment(DiscountSelection::all()),
        Ok(dec!(264100))
    );
}
