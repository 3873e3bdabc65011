//! `cms` entry-point: loads settings, wires the file-backed store and runs
//! one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use example_data::SeedRegistry;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing_subscriber::{EnvFilter, fmt};

use cms_backend::config::CmsSettings;
use cms_backend::domain::ports::SeededIdentityDirectory;
use cms_backend::inbound::cli::{Cli, CliContext};
use cms_backend::outbound::persistence::JsonFileStore;

fn init_tracing(json: bool) -> Result<()> {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| eyre!("tracing init failed: {e}"))
}

fn load_registry(settings: &CmsSettings) -> Result<SeedRegistry> {
    match settings.registry_path() {
        Some(path) => SeedRegistry::from_file(path)
            .wrap_err_with(|| format!("failed to load seed registry {}", path.display())),
        None => SeedRegistry::bundled().wrap_err("failed to load bundled seed registry"),
    }
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    // clap owns argv; settings come from the environment and config files.
    let settings = CmsSettings::load_from_iter([OsString::from("cms")])
        .map_err(|e| eyre!("failed to load settings: {e}"))?;
    init_tracing(settings.log_json())?;

    let cli = Cli::parse();

    let registry = load_registry(&settings)?;
    let directory = SeededIdentityDirectory::from_registry(&registry)
        .wrap_err("failed to convert seeded users")?;
    let seeds = settings
        .initial_complaints(&registry)
        .wrap_err("failed to convert seeded complaints")?;

    let storage_dir = Utf8PathBuf::from_path_buf(settings.storage_dir())
        .map_err(|path| eyre!("storage directory is not UTF-8: {}", path.display()))?;
    let store = JsonFileStore::open(&storage_dir)
        .wrap_err_with(|| format!("failed to open storage directory {storage_dir}"))?;

    let context = CliContext::new(Arc::new(store), directory, seeds, Arc::new(DefaultClock));
    let mut stdout = io::stdout().lock();
    match context.execute(cli.command, &mut stdout) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if err.is_user_facing() => {
            eprintln!("error: {err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}
