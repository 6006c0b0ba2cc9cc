use crate::alert::Alert;
use log::{info, warn};
use models::{
    AuthUser, Review, Subscription,
    course::{course_path, splice_course_code},
};
use std::{fmt::Display, future::Future};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter};

pub const NO_REVIEWS: &str =
    "No reviews found, if you've taken a course in the past, don't be shy to leave a review!";
pub const NO_SUBSCRIPTIONS: &str =
    "No subscriptions found, click the bell icon on a course to add one!";

/// The remote side of the profile page, scoped to the signed-in user
pub trait ProfileService {
    type Error: Display;

    fn get_user_reviews(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Review>, Self::Error>>;

    fn get_subscriptions(&self) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>>;

    fn remove_subscription(&self, course_id: &str)
    -> impl Future<Output = Result<(), Self::Error>>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumIter, AsRefStr)]
pub enum ProfileTab {
    #[default]
    Reviews,
    Subscriptions,
}

/// A review listed on the profile, headed by its course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileReview<'a> {
    pub heading: String,
    pub course_path: String,
    pub review: &'a Review,
}

/// The signed-in user's reviews and subscriptions.
///
/// Both lists are `None` until loaded; failures leave them unloaded and push
/// an error toast.
#[derive(Debug, Default, Clone)]
pub struct Profile {
    user: Option<AuthUser>,
    reviews: Option<Vec<Review>>,
    subscriptions: Option<Vec<Subscription>>,
    pub tab: ProfileTab,
    toasts: Vec<Alert>,
}

impl Profile {
    pub fn new(user: Option<AuthUser>) -> Self {
        Self {
            user,
            ..Default::default()
        }
    }

    pub fn mail(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.mail.as_str())
    }

    /// Loads reviews and subscriptions; does nothing when signed out
    pub async fn load<S>(&mut self, service: &S)
    where
        S: ProfileService,
    {
        let Some(user) = &self.user else {
            return;
        };

        match service.get_user_reviews(&user.id).await {
            Ok(mut reviews) => {
                reviews.sort_by_key(|review| review.timestamp_millis());
                self.reviews = Some(reviews);
            }
            Err(err) => {
                warn!("failed to fetch reviews of {}: {}", user.id, err);
                self.toasts.push(Alert::error(
                    "An error occurred while fetching your reviews, please try again later.",
                ));
            }
        }

        match service.get_subscriptions().await {
            Ok(subscriptions) => self.subscriptions = Some(subscriptions),
            Err(err) => {
                warn!("failed to fetch subscriptions: {err}");
                self.toasts.push(Alert::error(
                    "An error occurred while fetching your subscriptions, please try again later.",
                ));
            }
        }
    }

    /// Removes a subscription remotely, then locally
    pub async fn remove_subscription<S>(&mut self, service: &S, course_id: &str)
    where
        S: ProfileService,
    {
        match service.remove_subscription(course_id).await {
            Ok(()) => {
                if let Some(subscriptions) = &mut self.subscriptions {
                    subscriptions.retain(|subscription| subscription.course_id != course_id);
                }
                info!("removed subscription to {course_id}");
                self.toasts.push(Alert::success(format!(
                    "Subscription for course {} removed successfully.",
                    splice_course_code(course_id, " ")
                )));
            }
            Err(err) => {
                warn!("failed to remove subscription to {course_id}: {err}");
                self.toasts.push(Alert::error(
                    "An error occurred while removing your subscription, please try again later.",
                ));
            }
        }
    }

    /// The user's reviews, oldest first
    pub fn reviews(&self) -> Option<Vec<ProfileReview<'_>>> {
        self.reviews.as_ref().map(|reviews| {
            reviews
                .iter()
                .map(|review| ProfileReview {
                    heading: splice_course_code(&review.course_id, " "),
                    course_path: course_path(&review.course_id),
                    review,
                })
                .collect()
        })
    }

    pub fn subscriptions(&self) -> Option<&[Subscription]> {
        self.subscriptions.as_deref()
    }

    pub fn review_count_label(&self) -> Option<String> {
        self.reviews
            .as_ref()
            .map(|reviews| format!("{} review(s)", reviews.len()))
    }

    pub fn subscription_count_label(&self) -> Option<String> {
        self.subscriptions
            .as_ref()
            .map(|subscriptions| format!("{} subscription(s)", subscriptions.len()))
    }

    /// Empty-state message of the active tab, if its list loaded empty
    pub fn empty_message(&self) -> Option<&'static str> {
        match self.tab {
            ProfileTab::Reviews => self
                .reviews
                .as_ref()
                .is_some_and(Vec::is_empty)
                .then_some(NO_REVIEWS),
            ProfileTab::Subscriptions => self
                .subscriptions
                .as_ref()
                .is_some_and(Vec::is_empty)
                .then_some(NO_SUBSCRIPTIONS),
        }
    }

    pub fn toasts(&self) -> &[Alert] {
        &self.toasts
    }

    pub fn take_toasts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.toasts)
    }
}
