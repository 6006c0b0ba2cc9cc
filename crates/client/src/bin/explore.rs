use clap::Parser;
use client::{FetchError, Repo, connect};
use log::{error, info};
use models::Course;
use views::{
    course_card::{CourseCard, Segment},
    pagination::{PageOutcome, Paginator, Search},
    terms::BadgeVariant,
};

/// Lists courses page by page, or searches them
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Search query; lists every course when omitted
    #[arg(short, long)]
    query: Option<String>,

    /// Number of pages to load when listing
    #[arg(short, long, default_value_t = 1)]
    pages: usize,
}

/// Renders highlighted runs in brackets
fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.highlighted {
                format!("[{}]", segment.text)
            } else {
                segment.text.clone()
            }
        })
        .collect()
}

fn print_card(card: &CourseCard<'_>) {
    println!("{}  ({})", card.heading(), card.path());

    let badges: Vec<String> = card
        .badges()
        .iter()
        .map(|badge| format!("{} - {}", badge.term, badge.instructor))
        .collect();
    if !badges.is_empty() {
        println!(
            "  {} (icon {}px)",
            badges.join(" | "),
            BadgeVariant::Small.icon_size()
        );
    }

    println!("  {}\n", render_segments(&card.description_segments()));
}

async fn list(repo: &Repo, page_size: usize, pages: usize) -> Result<(), FetchError> {
    let mut courses: Paginator<Course> = Paginator::new(page_size);
    courses.load_first(repo).await?;

    for _ in 1..pages {
        if courses.fetch_more(repo).await? == PageOutcome::Exhausted {
            break;
        }
    }

    println!("Showing all courses\n");
    for course in courses.items() {
        print_card(&CourseCard::new(course));
    }

    if !courses.has_more() {
        info!("reached the end of the course list");
    }

    Ok(())
}

async fn search(repo: &Repo, query: &str) -> Result<(), FetchError> {
    let mut search: Search<Course> = Search::new();
    search.run(repo, query).await?;

    println!("{} results for {:?}\n", search.results().len(), search.query());
    for course in search.results() {
        print_card(&CourseCard::new(course).with_query(search.query()));
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = match connect() {
        Ok((config, repo)) => match &args.query {
            Some(query) => search(&repo, query).await,
            None => list(&repo, config.page_size, args.pages.max(1)).await,
        },
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        error!("{err}");
        eprintln!("{}", views::AlertStatus::Error.default_message());
        std::process::exit(1);
    }
}
