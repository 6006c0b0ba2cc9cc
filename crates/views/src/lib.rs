pub mod alert;
pub mod averages;
pub mod context;
pub mod course_card;
pub mod feed;
pub mod interactions;
pub mod pagination;
pub mod profile;
pub mod requirements;
pub mod review_card;
pub mod review_filter;
pub mod terms;
pub mod text;

pub use crate::{
    alert::{Alert, AlertStatus},
    averages::CourseAverages,
    context::AppContext,
    course_card::{CourseCard, RatingSummary},
    feed::{FeedPage, FeedSource, ReviewFeed},
    interactions::{InteractionAction, InteractionService, ReviewInteractions},
    pagination::{PageOutcome, PageSource, Paginator, Search, SearchSource},
    profile::{Profile, ProfileService},
    requirements::{CourseRequirements, ReqNode, linkify},
    review_card::ReviewCard,
    review_filter::{FilterCriteria, ReviewPanel, ReviewSortType, filter_reviews},
    terms::{TermBadge, unique_term_instructors},
};
