use clap::Parser;
use client::{FetchError, ReviewQuery, connect};
use futures::{future::join_all, try_join};
use log::{error, warn};
use views::{
    course_card::{CourseCard, RatingSummary},
    interactions::ReviewInteractions,
    requirements::CourseRequirements,
    review_card::ReviewCard,
    review_filter::{ReviewPanel, ReviewSortType, instructor_options},
};

/// Shows a course page with its filtered reviews
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Course id, e.g. `COMP202` or `comp-202`
    course: String,

    /// One of "Most Recent", "Least Recent", "Highest Rating", "Lowest Rating", "Hardest", "Easiest"
    #[arg(short, long, default_value = "Most Recent")]
    sort: String,

    /// Only show reviews mentioning this instructor; repeatable
    #[arg(short, long)]
    instructor: Vec<String>,

    /// Only show reviews with this rating; repeatable
    #[arg(short, long)]
    rating: Vec<u8>,

    /// Only show reviews with this difficulty; repeatable
    #[arg(short, long)]
    difficulty: Vec<u8>,

    /// Show every matching review instead of the first few
    #[arg(short, long)]
    all: bool,
}

fn panel(args: &Args) -> ReviewPanel {
    let mut panel = ReviewPanel::new();
    panel.set_sort(ReviewSortType::from_label(&args.sort));

    for name in &args.instructor {
        panel.toggle_instructor(name);
    }
    for rating in &args.rating {
        panel.toggle_rating(*rating);
    }
    for difficulty in &args.difficulty {
        panel.toggle_difficulty(*difficulty);
    }

    panel.set_show_all(args.all);
    panel
}

async fn run(args: Args) -> Result<(), FetchError> {
    let (_, repo) = connect()?;
    let id = args.course.replace('-', "").to_uppercase();

    let query = ReviewQuery::course(&id);
    let (course, payload) = try_join!(
        repo.get_course(&id),
        repo.get_reviews(&query)
    )?;

    let Some(course) = course else {
        eprintln!("Course {id} was not found");
        return Ok(());
    };

    let reviews = payload.reviews;
    let card = CourseCard::new(&course);
    println!("{}\n{}\n", card.heading(), course.description);

    let average = match reviews.len() {
        0 => 0.0,
        n => reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / n as f64,
    };
    println!("Rating: {}", RatingSummary::new(average, reviews.len()).text());

    for badge in card.badges() {
        println!("{}: {}", badge.term, badge.instructor);
    }
    println!();

    for block in CourseRequirements::from(&course.requirements()).blocks() {
        println!("{block}\n");
    }

    let instructors = instructor_options(&course);
    if !instructors.is_empty() {
        println!("Instructors: {}\n", instructors.join(", "));
    }

    let panel = panel(&args);
    let displayed = panel.displayed(&reviews);

    let mut controls: Vec<ReviewInteractions> = displayed
        .iter()
        .map(|review| ReviewInteractions::new(&review.course_id, &review.user_id))
        .collect();
    join_all(controls.iter_mut().map(|control| control.refresh(&repo, None))).await;

    println!(
        "{} of {} reviews, {}",
        displayed.len(),
        panel.visible(&reviews).len(),
        panel.criteria().sort_by
    );

    for (review, control) in displayed.into_iter().zip(&controls) {
        let card = ReviewCard::new(review);
        if let Some(alert) = control.error() {
            warn!("{}", alert.message());
        }

        println!(
            "\n{}/5 rating, {}/5 difficulty, {} likes, {}",
            review.rating,
            review.difficulty,
            control.likes(),
            card.date()
        );
        println!("{}", card.content());
        println!("{}", card.attribution().to_text());
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
