mod cli;
mod commands;
mod config;
mod error;
mod models;
mod services;

pub use config::DemoConfig;
pub use error::AppError;
pub use models::classify_types::{DemoSnapshot, ErrorState, PredictionMap, SubmitOutcome};
pub use models::queue_types::{FileId, PendingFile, SelectedFile};
pub use services::classifier::remote::RemoteClassifier;
pub use services::classifier::GenreClassifier;
pub use services::demo_session::DemoSession;

use cli::{CliArgs, ReplCommand};
use log::{error, info};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, cli::USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", cli::USAGE);
        return;
    }

    // One thread: uploads run concurrently on the event loop, state is never
    // touched in parallel.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to start async runtime");

    let code = runtime.block_on(async move {
        match start(args).await {
            Ok(code) => code,
            Err(e) => {
                error!("{}", e);
                2
            }
        }
    });
    std::process::exit(code);
}

async fn start(args: CliArgs) -> Result<i32, AppError> {
    let mut config = DemoConfig::from_env()?;
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if args.timeout.is_some() {
        config.timeout = args.timeout;
    }

    let classifier = RemoteClassifier::new(&config)?;
    info!("Using classification endpoint {}", classifier.endpoint());
    let session = DemoSession::new();

    if args.paths.is_empty() {
        interactive(&session, &classifier).await?;
        return Ok(0);
    }

    commands::demo::add_paths(&session, &args.paths).await?;
    let outcome = commands::demo::predict_genres(&session, &classifier).await;
    print!("{}", commands::demo::get_demo_view(&session).await);

    Ok(match outcome {
        SubmitOutcome::Predicted(_) => 0,
        _ => 1,
    })
}

async fn interactive<C: GenreClassifier>(session: &DemoSession, classifier: &C) -> Result<(), AppError> {
    println!("{}\n", cli::INTERACTIVE_HELP);
    print!("{}", commands::demo::get_demo_view(session).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match ReplCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            ReplCommand::Add(paths) => {
                if let Err(e) = commands::demo::add_paths(session, &paths).await {
                    println!("{}", e);
                }
            }
            ReplCommand::Remove(position) => match commands::demo::remove_file(session, position).await {
                Ok(removed) => println!("Removed {}", removed.name),
                Err(e) => println!("{}", e),
            },
            ReplCommand::Predict => {
                commands::demo::predict_genres(session, classifier).await;
            }
            ReplCommand::Show => {}
            ReplCommand::Help => {
                println!("{}", cli::INTERACTIVE_HELP);
                continue;
            }
            ReplCommand::Quit => break,
        }

        print!("{}", commands::demo::get_demo_view(session).await);
    }

    Ok(())
}
