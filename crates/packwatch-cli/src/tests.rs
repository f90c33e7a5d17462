use super::*;

#[test]
fn parses_scan_defaults() {
    let cli = Cli::try_parse_from(["packwatch", "scan"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Scan {
            shop: None,
            dry_run: false
        }
    ));
}

#[test]
fn parses_scan_with_shop_and_dry_run() {
    let cli = Cli::try_parse_from(["packwatch", "scan", "--shop", "matraws", "--dry-run"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Scan { shop, dry_run } => {
            assert_eq!(shop.as_deref(), Some("matraws"));
            assert!(dry_run);
        }
        other => panic!("expected Scan, got {other:?}"),
    }
}

#[test]
fn parses_classify_with_options() {
    let cli = Cli::try_parse_from([
        "packwatch",
        "classify",
        "Crown Zenith ETB",
        "--extra",
        "Pokémon TCG",
        "--series-hint",
        "Crown Zenith",
        "--json",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Commands::Classify {
            title,
            extra,
            series_hint,
            json,
        } => {
            assert_eq!(title, "Crown Zenith ETB");
            assert_eq!(extra.as_deref(), Some("Pokémon TCG"));
            assert_eq!(series_hint.as_deref(), Some("Crown Zenith"));
            assert!(json);
        }
        other => panic!("expected Classify, got {other:?}"),
    }
}

#[test]
fn classify_requires_a_title() {
    assert!(Cli::try_parse_from(["packwatch", "classify"]).is_err());
}

#[test]
fn parses_shops_command() {
    let cli = Cli::try_parse_from(["packwatch", "shops"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Shops));
}

#[test]
fn parses_series_command() {
    let cli = Cli::try_parse_from(["packwatch", "series"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Series));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["packwatch"]).is_err());
}
