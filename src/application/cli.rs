use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::ui::help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ResolverName;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

pub fn log_path() -> path::PathBuf {
    if let Ok(dir) = std::env::var("MOSAIC_LOG_DIR") {
        return path::PathBuf::from(dir).join("debug.log");
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("mosaic/debug.log");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!(
        "Created default config file at {}",
        config_file_path.display()
    );
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Mosaic")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Mosaic with environment variable RUST_LOG=mosaic")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        )
        .subcommand(
            Command::new("resolvers").about("List all available response resolvers.")
        );
}

fn arg_resolver() -> Arg {
    return Arg::new(ConfigKey::Resolver.to_string())
        .short('r')
        .long(ConfigKey::Resolver.to_string())
        .env("MOSAIC_RESOLVER")
        .num_args(1)
        .help(format!(
            "The resolver that generates assistant replies. [default: {}]",
            Config::default(ConfigKey::Resolver)
        ))
        .value_parser(PossibleValuesParser::new(ResolverName::VARIANTS));
}

fn arg_composing_delay() -> Arg {
    return Arg::new(ConfigKey::ComposingDelay.to_string())
        .long(ConfigKey::ComposingDelay.to_string())
        .env("MOSAIC_COMPOSING_DELAY")
        .num_args(1)
        .help(format!(
            "Milliseconds to wait after sending a message before the assistant starts composing. [default: {}]",
            Config::default(ConfigKey::ComposingDelay)
        ));
}

fn arg_resolve_delay() -> Arg {
    return Arg::new(ConfigKey::ResolveDelay.to_string())
        .long(ConfigKey::ResolveDelay.to_string())
        .env("MOSAIC_RESOLVE_DELAY")
        .num_args(1)
        .help(format!(
            "Milliseconds the assistant spends composing before its reply resolves. [default: {}]",
            Config::default(ConfigKey::ResolveDelay)
        ));
}

fn arg_cancel_on_send() -> Arg {
    return Arg::new(ConfigKey::CancelOnSend.to_string())
        .long(ConfigKey::CancelOnSend.to_string())
        .env("MOSAIC_CANCEL_ON_SEND")
        .num_args(1)
        .help(format!(
            "Cancel replies that are still pending whenever a new message is sent. [default: {}]",
            Config::default(ConfigKey::CancelOnSend)
        ))
        .value_parser(PossibleValuesParser::new(["true", "false"]));
}

fn arg_welcome() -> Arg {
    return Arg::new(ConfigKey::Welcome.to_string())
        .long(ConfigKey::Welcome.to_string())
        .env("MOSAIC_WELCOME")
        .num_args(1)
        .help(format!(
            "Start the session with the demo conversation. [default: {}]",
            Config::default(ConfigKey::Welcome)
        ))
        .value_parser(PossibleValuesParser::new(["true", "false"]));
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start a new chat session.")
        .arg(arg_resolver())
        .arg(arg_composing_delay())
        .arg(arg_resolve_delay())
        .arg(arg_cancel_on_send())
        .arg(arg_welcome());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("mosaic")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_resolver())
        .arg(arg_composing_delay())
        .arg(arg_resolve_delay())
        .arg(arg_cancel_on_send())
        .arg(arg_welcome())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("MOSAIC_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("MOSAIC_USERNAME")
                .num_args(1)
                .help(format!("Your user name displayed above your messages. [default: {}]", Config::default(ConfigKey::Username)))
                .global(true),
        );
}

/// Returns true when a chat session should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_path().display());
                }
                Some(("enum-config", _)) => {
                    println!("{}", ConfigKey::VARIANTS.join("\n"));
                }
                Some(("resolvers", _)) => {
                    println!("{}", ResolverName::VARIANTS.join("\n"));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
