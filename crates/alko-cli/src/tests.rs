use super::*;

#[test]
fn parses_cities_command() {
    let cli = Cli::try_parse_from(["alko-cli", "cities"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Cities { output: None }));
}

#[test]
fn parses_cities_output_override() {
    let cli = Cli::try_parse_from(["alko-cli", "cities", "--output", "/tmp/cities.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Cities { output: Some(ref p) } if p == &PathBuf::from("/tmp/cities.json")
    ));
}

#[test]
fn parses_categories_command() {
    let cli = Cli::try_parse_from(["alko-cli", "categories"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Categories { output: None }));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["alko-cli"]).is_err());
}

#[test]
fn unknown_command_is_an_error() {
    assert!(Cli::try_parse_from(["alko-cli", "brands"]).is_err());
}

#[test]
fn products_defaults_to_configured_categories() {
    let cli = Cli::try_parse_from(["alko-cli", "products"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Products {
            ref categories,
            output: None,
            dry_run: false
        } if categories.is_empty()
    ));
}

#[test]
fn products_accepts_repeated_categories() {
    let cli = Cli::try_parse_from([
        "alko-cli",
        "products",
        "--category",
        "https://alkoteka.com/catalog/skidki",
        "--category",
        "https://alkoteka.com/catalog/produkty-1",
    ])
    .unwrap();
    let Commands::Products { categories, .. } = cli.command else {
        panic!("expected products command");
    };
    assert_eq!(
        categories,
        vec![
            "https://alkoteka.com/catalog/skidki".to_string(),
            "https://alkoteka.com/catalog/produkty-1".to_string()
        ]
    );
}

#[test]
fn products_dry_run() {
    let cli = Cli::try_parse_from(["alko-cli", "products", "--dry-run"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Products { dry_run: true, .. }
    ));
}

#[test]
fn products_output_override() {
    let cli = Cli::try_parse_from(["alko-cli", "products", "--output", "out/beer.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Products { output: Some(ref p), .. } if p == &PathBuf::from("out/beer.json")
    ));
}
