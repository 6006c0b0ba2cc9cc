pub mod average;
pub mod course;
pub mod interaction;
pub mod requirements;
pub mod review;
pub mod subscription;
pub mod term;
pub mod user;

pub use crate::{
    average::TermAverage,
    course::{Block, Course, Instructor, Schedule},
    interaction::{InteractionKind, InteractionRequest, InteractionsPayload},
    requirements::Requirements,
    review::Review,
    subscription::Subscription,
    term::{Season, Term, TermParseError, compare_terms},
    user::AuthUser,
};
