use super::*;
use clap::CommandFactory;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn effective_api_base_prefers_flag() {
    assert_eq!(effective_api_base(Some(" http://bot:8000/api "), "https://saved/api"), "http://bot:8000/api");
}

#[test]
fn effective_api_base_uses_absolute_saved_value() {
    assert_eq!(effective_api_base(None, "https://saved/api"), "https://saved/api");
    assert_eq!(effective_api_base(Some("  "), "https://saved/api"), "https://saved/api");
}

#[test]
fn effective_api_base_replaces_relative_saved_value() {
    assert_eq!(effective_api_base(None, "/api"), DEFAULT_CLI_API_BASE);
}

#[test]
fn config_patch_parses_enums() {
    let args = ConfigSetArgs {
        theme: Some("dark".to_owned()),
        position: Some("bottom-left".to_owned()),
        max_results: Some(3),
        ..ConfigSetArgs::default()
    };
    let patch = config_patch(args).unwrap();
    assert_eq!(patch.theme, Some(Theme::Dark));
    assert_eq!(patch.position, Some(Position::BottomLeft));
    assert_eq!(patch.max_results, Some(3));
    assert_eq!(patch.api_base, None);
}

#[test]
fn config_patch_rejects_unknown_theme() {
    let args = ConfigSetArgs { theme: Some("neon".to_owned()), ..ConfigSetArgs::default() };
    let err = config_patch(args).unwrap_err();
    assert_eq!(err.to_string(), "invalid value for theme: `neon`");
}

#[test]
fn chat_subcommand_parses_one_shot_message() {
    let cli = Cli::try_parse_from(["chatbot", "--api-base", "http://h/api", "chat", "-m", "hi"]).unwrap();
    assert_eq!(cli.api_base.as_deref(), Some("http://h/api"));
    assert!(matches!(cli.command, Command::Chat { message: Some(ref m) } if m == "hi"));
}

#[test]
fn config_set_stores_into_directory_without_run_override() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = CliContext {
        config_dir: dir.path().to_path_buf(),
        api_base: Some("http://override/api".to_owned()),
        timeout: Duration::from_secs(1),
    };
    let command = ConfigCommand {
        command: ConfigSubcommand::Set(ConfigSetArgs { title: Some("Helper".to_owned()), ..ConfigSetArgs::default() }),
    };
    run_config(&ctx, command).unwrap();

    let saved = ConfigStore::load(FileStore::new(dir.path())).current();
    assert_eq!(saved.title, "Helper");
    assert_eq!(saved.api_base, chatbot::config::DEFAULT_API_BASE);
    assert_eq!(ctx.config().current().api_base, "http://override/api");
}
