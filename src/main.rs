use chrono::Local;
use clap::Parser;
use grana::args::{Args, Command};
use grana::{api, commands, is_unauthorized, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            if is_unauthorized(&e) {
                eprintln!("The saved session was not accepted, run 'grana login'");
            }
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().grana_home().path();

    // This allows for running the program without a Grana server. When
    // GRANA_IN_TEST_MODE is set and non-zero in length, then the mode will be
    // Mode::Test, otherwise it will be Mode::Http.
    let mode = Mode::from_env();
    let today = Local::now().date_naive();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args).await?.print(),

        Command::Register(register_args) => {
            let config = Config::load(home).await?;
            let mut api = api::client(&config, None, mode)?;
            commands::register(api.as_mut(), register_args)
                .await?
                .print()
        }

        Command::Login(login_args) => {
            let config = Config::load(home).await?;
            let mut api = api::client(&config, None, mode)?;
            commands::login(&config, api.as_mut(), login_args)
                .await?
                .print()
        }

        Command::Logout => {
            let config = Config::load(home).await?;
            commands::logout(&config).await?.print()
        }

        Command::Status => {
            let config = Config::load(home).await?;
            let mut api = api::authenticated_client(&config, mode).await?;
            commands::status(today, &config, api.as_mut())
                .await?
                .print()
        }

        Command::Months(months_args) => commands::months(today, months_args).await?.print(),

        Command::List(list_args) => {
            let config = Config::load(home).await?;
            let mut api = api::authenticated_client(&config, mode).await?;
            commands::list(today, api.as_mut(), list_args).await?.print()
        }

        Command::Show(show_args) => {
            let config = Config::load(home).await?;
            let mut api = api::authenticated_client(&config, mode).await?;
            commands::show(api.as_mut(), show_args).await?.print()
        }

        Command::Add(add_args) => {
            let config = Config::load(home).await?;
            let mut api = api::authenticated_client(&config, mode).await?;
            commands::add(api.as_mut(), add_args).await?.print()
        }

        Command::Edit(edit_args) => {
            let config = Config::load(home).await?;
            let mut api = api::authenticated_client(&config, mode).await?;
            commands::edit(api.as_mut(), edit_args).await?.print()
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home).await?;
            let mut api = api::authenticated_client(&config, mode).await?;
            commands::delete(api.as_mut(), delete_args).await?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
