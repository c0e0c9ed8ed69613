#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Error;
use anyhow::Result;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ResolverName;
use crate::domain::models::UuidIds;
use crate::domain::services::SessionStore;
use crate::infrastructure::resolvers::canned::welcome_transcript;
use crate::infrastructure::resolvers::ResolverManager;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! Mosaic has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            env!("VERGEN_GIT_DESCRIBE"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

async fn run_chat() -> Result<()> {
    let resolver_name = Config::get(ConfigKey::Resolver);
    let resolver = match ResolverName::parse(resolver_name.to_string()) {
        Some(name) => ResolverManager::get(name)?,
        None => bail!(format!("No resolver named {resolver_name}")),
    };

    let store = SessionStore::new(
        resolver,
        Arc::new(UuidIds::default()),
        Config::session_settings()?,
    );
    if Config::get_bool(ConfigKey::Welcome) {
        store.seed_history(welcome_transcript());
    }

    let mut username = Config::get(ConfigKey::Username);
    if username.is_empty() {
        username = Config::default(ConfigKey::Username);
    }

    println!(
        "{}",
        Paint::new("Mosaic chat. Type /help for commands, /quit to exit.").bold()
    );

    return ui::start(store, &username).await;
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let log_path = cli::log_path();
    let log_dir = log_path
        .parent()
        .map(|dir| return dir.to_path_buf())
        .unwrap_or_else(|| return env::temp_dir());

    let file_appender = tracing_appender::rolling::never(log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("mosaic")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    match cli::parse().await {
        Ok(true) => {}
        Ok(false) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    }

    if let Err(err) = run_chat().await {
        handle_error(err);
    }

    process::exit(0);
}
