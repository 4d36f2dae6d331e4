//! GameButler command-line recommender.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamebutler::cli::{render_listing, render_recommendation, Args, NO_MATCH_MESSAGE};
use gamebutler::services::{loader, Recommender};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let library = match loader::load(&args.csv) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Error loading library: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let recommender = Recommender::new(library);
    let filter = args.filter();

    if args.list {
        let matches = recommender.candidates(&filter);
        if matches.is_empty() {
            println!("\n{}\n", NO_MATCH_MESSAGE);
        } else {
            println!("{}", render_listing(&matches));
        }
        return ExitCode::SUCCESS;
    }

    match recommender.recommend(&filter) {
        Some(game) => println!("{}", render_recommendation(game)),
        None => println!("\n{}\n", NO_MATCH_MESSAGE),
    }

    ExitCode::SUCCESS
}
