use log::info;
use models::AuthUser;

/// State shared by every view of a session, passed down explicitly.
///
/// `generation` keys the view tree: views built for an older generation are
/// discarded and rebuilt, which is how the application recovers after an
/// unrecoverable view error.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppContext {
    user: Option<AuthUser>,
    dark_mode: bool,
    generation: u64,
    failure: Option<String>,
}

impl AppContext {
    pub fn new(user: Option<AuthUser>, dark_mode: bool) -> Self {
        Self {
            user,
            dark_mode,
            ..Default::default()
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn sign_in(&mut self, user: AuthUser) {
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flips the theme and returns the new setting
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a view built for `generation` is still current
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Records an unrecoverable view error; the error page is shown until [`AppContext::reset`]
    pub fn fail(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Recovers from a view error with fresh state.
    ///
    /// The session is dropped and must be fetched again; the theme lives
    /// outside the recovered tree and is kept.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.user = None;
        self.failure = None;
        info!("view state reset, generation {}", self.generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            id: "me".into(),
            mail: "me@mail.mcgill.ca".into(),
        }
    }

    #[test]
    fn test_toggle_dark_mode() {
        let mut context = AppContext::default();
        assert!(context.toggle_dark_mode());
        assert!(!context.toggle_dark_mode());
    }

    #[test]
    fn test_reset_after_failure() {
        let mut context = AppContext::new(Some(user()), true);
        let generation = context.generation();

        context.fail("review list failed to render");
        assert_eq!(context.failure(), Some("review list failed to render"));

        context.reset();
        assert!(context.failure().is_none());
        assert!(context.user().is_none());
        assert!(context.dark_mode());
        assert!(!context.is_current(generation));
        assert!(context.is_current(generation + 1));
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut context = AppContext::default();
        context.sign_in(user());
        assert_eq!(context.user().map(|u| u.id.as_str()), Some("me"));
        context.sign_out();
        assert!(context.user().is_none());
    }
}
