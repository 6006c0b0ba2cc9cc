use chrono::Utc;
use clap::Parser;
use client::{FetchError, connect};
use log::error;
use views::{
    feed::ReviewFeed,
    pagination::PageOutcome,
    review_card::ReviewCard,
};

/// Prints the newest reviews across all courses
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of pages to load
    #[arg(short, long, default_value_t = 1)]
    pages: usize,
}

fn print_card(card: &ReviewCard<'_>) {
    println!(
        "  {}/5 rating, {}/5 difficulty, {} likes, {}",
        card.review.rating,
        card.review.difficulty,
        card.review.likes,
        card.date()
    );
    println!("  {}", card.content());
    println!("  {}\n", card.attribution().to_text());
}

async fn run(args: Args) -> Result<(), FetchError> {
    let (config, repo) = connect()?;
    let mut feed = ReviewFeed::new(config.page_size);

    if feed.load(&repo).await == PageOutcome::Skipped {
        if let Some(alert) = feed.error() {
            eprintln!("{}", alert.message());
        }
        return Ok(());
    }

    for _ in 1..args.pages.max(1) {
        if feed.fetch_more(&repo).await? == PageOutcome::Exhausted {
            break;
        }
    }

    println!("What people are saying");
    if let Some(tagline) = feed.tagline() {
        println!("{tagline}\n");
    }

    for entry in feed.entries(Utc::now()) {
        println!("{} ({})  {}", entry.heading, entry.course_path, entry.posted);
        print_card(&entry.card);
    }

    if let Some(footer) = feed.footer() {
        println!("{footer}");
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run(Args::parse()).await {
        error!("{err}");
        std::process::exit(1);
    }
}
