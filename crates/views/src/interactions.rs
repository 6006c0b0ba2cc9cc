use crate::alert::Alert;
use log::{debug, warn};
use models::{AuthUser, InteractionKind, InteractionRequest, InteractionsPayload};
use std::{
    fmt::Display,
    future::Future,
    time::{Duration, Instant},
};

/// How long the sign-in prompt stays up after an anonymous vote
pub const LOGIN_PROMPT_DURATION: Duration = Duration::from_secs(3);

/// The remote side of review likes and dislikes
pub trait InteractionService {
    type Error: Display;

    /// Current reaction of `referrer` to the review, plus its like count
    fn get_interactions(
        &self,
        course_id: &str,
        user_id: &str,
        referrer: Option<&str>,
    ) -> impl Future<Output = Result<InteractionsPayload, Self::Error>>;

    fn add_interaction(
        &self,
        request: &InteractionRequest,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    fn remove_interaction(
        &self,
        request: &InteractionRequest,
    ) -> impl Future<Output = Result<(), Self::Error>>;
}

/// What pressing a reaction button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionAction {
    Add(InteractionKind),
    /// Pressing the active reaction again clears it
    Remove,
    /// Anonymous users are asked to sign in instead
    PromptLogin,
}

impl InteractionAction {
    pub fn resolve(
        user: Option<&AuthUser>,
        current: Option<InteractionKind>,
        pressed: InteractionKind,
    ) -> Self {
        match user {
            None => InteractionAction::PromptLogin,
            Some(_) if current == Some(pressed) => InteractionAction::Remove,
            Some(_) => InteractionAction::Add(pressed),
        }
    }
}

/// Like and dislike controls of one review
#[derive(Debug, Clone)]
pub struct ReviewInteractions {
    course_id: String,
    user_id: String,
    kind: Option<InteractionKind>,
    likes: i64,
    error: Option<Alert>,
    prompt_until: Option<Instant>,
}

impl ReviewInteractions {
    /// Controls for the review `user_id` wrote about `course_id`
    pub fn new(course_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            user_id: user_id.into(),
            kind: None,
            likes: 0,
            error: None,
            prompt_until: None,
        }
    }

    pub fn kind(&self) -> Option<InteractionKind> {
        self.kind
    }

    pub fn likes(&self) -> i64 {
        self.likes
    }

    pub fn error(&self) -> Option<&Alert> {
        self.error.as_ref()
    }

    pub fn login_prompt_visible(&self, now: Instant) -> bool {
        self.prompt_until.is_some_and(|until| now < until)
    }

    fn request(&self, kind: Option<InteractionKind>, referrer: &AuthUser) -> InteractionRequest {
        InteractionRequest {
            kind,
            course_id: self.course_id.clone(),
            user_id: self.user_id.clone(),
            referrer: referrer.id.clone(),
        }
    }

    fn record_error(&mut self, error: impl Display) {
        warn!(
            "interaction on review of {} by {} failed: {}",
            self.course_id, self.user_id, error
        );
        self.error = Some(Alert::error(error.to_string()));
    }

    /// Reloads the viewer's reaction and the like count
    pub async fn refresh<S>(&mut self, service: &S, user: Option<&AuthUser>)
    where
        S: InteractionService,
    {
        let referrer = user.map(|user| user.id.as_str());

        match service
            .get_interactions(&self.course_id, &self.user_id, referrer)
            .await
        {
            Ok(payload) => {
                self.kind = payload.kind;
                self.likes = payload.likes;
            }
            Err(err) => self.record_error(err),
        }
    }

    /// Handles a press of the like or dislike button
    ///
    /// # Arguments
    /// * `service` - Where the reaction is stored
    /// * `user` - The signed-in user, if any
    /// * `pressed` - Which button was pressed
    /// * `now` - When it was pressed, used for the sign-in prompt timer
    ///
    /// # Returns
    /// The action that was taken
    pub async fn press<S>(
        &mut self,
        service: &S,
        user: Option<&AuthUser>,
        pressed: InteractionKind,
        now: Instant,
    ) -> InteractionAction
    where
        S: InteractionService,
    {
        let action = InteractionAction::resolve(user, self.kind, pressed);
        debug!("{pressed} pressed on review of {}: {action:?}", self.course_id);

        let result = match (action, user) {
            (InteractionAction::Add(kind), Some(user)) => {
                service.add_interaction(&self.request(Some(kind), user)).await
            }
            (InteractionAction::Remove, Some(user)) => {
                service.remove_interaction(&self.request(None, user)).await
            }
            _ => {
                self.prompt_until = Some(now + LOGIN_PROMPT_DURATION);
                return action;
            }
        };

        match result {
            Ok(()) => self.refresh(service, user).await,
            Err(err) => self.record_error(err),
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Keeps a single viewer's reaction in memory
    #[derive(Default)]
    struct InMemory {
        kind: RefCell<Option<InteractionKind>>,
        calls: RefCell<Vec<String>>,
        fail: bool,
    }

    impl InteractionService for InMemory {
        type Error = String;

        async fn get_interactions(
            &self,
            _course_id: &str,
            _user_id: &str,
            referrer: Option<&str>,
        ) -> Result<InteractionsPayload, String> {
            let kind = *self.kind.borrow();
            Ok(InteractionsPayload {
                kind: referrer.and(kind),
                likes: match kind {
                    Some(InteractionKind::Like) => 1,
                    Some(InteractionKind::Dislike) => -1,
                    None => 0,
                },
            })
        }

        async fn add_interaction(&self, request: &InteractionRequest) -> Result<(), String> {
            if self.fail {
                return Err("Internal Server Error".into());
            }
            self.calls.borrow_mut().push(format!("add {:?}", request.kind));
            *self.kind.borrow_mut() = request.kind;
            Ok(())
        }

        async fn remove_interaction(&self, request: &InteractionRequest) -> Result<(), String> {
            self.calls.borrow_mut().push(format!("remove {}", request.referrer));
            *self.kind.borrow_mut() = None;
            Ok(())
        }
    }

    fn me() -> AuthUser {
        AuthUser {
            id: "me".into(),
            mail: "me@mail.mcgill.ca".into(),
        }
    }

    #[test]
    fn test_resolve() {
        let user = me();
        assert_eq!(
            InteractionAction::resolve(None, None, InteractionKind::Like),
            InteractionAction::PromptLogin
        );
        assert_eq!(
            InteractionAction::resolve(Some(&user), Some(InteractionKind::Like), InteractionKind::Like),
            InteractionAction::Remove
        );
        assert_eq!(
            InteractionAction::resolve(
                Some(&user),
                Some(InteractionKind::Like),
                InteractionKind::Dislike
            ),
            InteractionAction::Add(InteractionKind::Dislike)
        );
    }

    #[tokio::test]
    async fn test_like_then_unlike() {
        let service = InMemory::default();
        let user = me();
        let mut controls = ReviewInteractions::new("COMP202", "author");
        let now = Instant::now();

        controls
            .press(&service, Some(&user), InteractionKind::Like, now)
            .await;
        assert_eq!(controls.kind(), Some(InteractionKind::Like));
        assert_eq!(controls.likes(), 1);

        controls
            .press(&service, Some(&user), InteractionKind::Like, now)
            .await;
        assert_eq!(controls.kind(), None);
        assert_eq!(controls.likes(), 0);
        assert_eq!(
            *service.calls.borrow(),
            ["add Some(Like)", "remove me"]
        );
    }

    #[tokio::test]
    async fn test_anonymous_press_prompts_login() {
        let service = InMemory::default();
        let mut controls = ReviewInteractions::new("COMP202", "author");
        let now = Instant::now();

        let action = controls
            .press(&service, None, InteractionKind::Dislike, now)
            .await;

        assert_eq!(action, InteractionAction::PromptLogin);
        assert!(controls.login_prompt_visible(now + Duration::from_secs(2)));
        assert!(!controls.login_prompt_visible(now + LOGIN_PROMPT_DURATION));
        assert!(service.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failure_surfaces_alert() {
        let service = InMemory {
            fail: true,
            ..Default::default()
        };
        let user = me();
        let mut controls = ReviewInteractions::new("COMP202", "author");

        controls
            .press(&service, Some(&user), InteractionKind::Like, Instant::now())
            .await;

        assert_eq!(
            controls.error().map(Alert::message),
            Some("Internal Server Error")
        );
        assert_eq!(controls.kind(), None);
    }
}
