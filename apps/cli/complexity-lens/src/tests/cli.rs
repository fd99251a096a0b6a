use crate::cli::{Cli, Command, KeyAction};

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

#[test]
fn given_cli_definition_then_clap_accepts_it() {
    Cli::command().debug_assert();
}

/// **VALUE**: Verifies global flags may follow the subcommand.
///
/// **BUG THIS CATCHES**: Would catch `global = true` being dropped, which makes
/// `complexity-lens analyze ... --verbose` a usage error.
#[test]
fn given_analyze_with_trailing_globals_when_parsed_then_all_fields_set() {
    // GIVEN/WHEN: Global flags after the subcommand
    let cli = Cli::try_parse_from([
        "complexity-lens",
        "analyze",
        "--page",
        "two-sum.html",
        "--url",
        "https://leetcode.com/problems/two-sum/",
        "--config-dir",
        "/tmp/lens",
        "--verbose",
    ])
    .expect("should parse");

    // THEN: Everything lands where expected
    assert!(cli.verbose);
    assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/lens")));
    match cli.command {
        Command::Analyze { page, url } => {
            assert_eq!(page, PathBuf::from("two-sum.html"));
            assert_eq!(url, "https://leetcode.com/problems/two-sum/");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn given_key_set_when_parsed_then_key_captured() {
    let cli = Cli::try_parse_from(["complexity-lens", "key", "set", "AIza-abc"])
        .expect("should parse");

    match cli.command {
        Command::Key {
            action: KeyAction::Set { key },
        } => assert_eq!(key, "AIza-abc"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn given_analyze_without_url_when_parsed_then_usage_error() {
    let result = Cli::try_parse_from(["complexity-lens", "analyze", "--page", "p.html"]);

    assert!(result.is_err());
}
