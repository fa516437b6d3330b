//! Composition root for one client session.
//!
//! Holds everything the top-level screen owns: the signed-in user, the
//! submitted profile, the recommendations, the loading flag and the last
//! error. Storage and the model are injected. HTTP handlers build one per
//! request over a `MemorySessionStore`.

use tracing::{info, warn};

use crate::dashboard::selection::Dashboard;
use crate::guidance::{CareerAdvisor, InFlight, ServiceError};
use crate::models::career::RecommendationResponse;
use crate::models::profile::UserProfile;
use crate::models::user::AuthUser;
use crate::onboarding::form::ProfileForm;
use crate::session::store::{SessionStore, StoreError};
use crate::session::{self, AuthMode};

#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    Completed,
    /// A recommendation request is already outstanding.
    Busy,
}

pub struct CareerApp<S: SessionStore> {
    store: S,
    user: Option<AuthUser>,
    profile: Option<UserProfile>,
    recommendations: Option<RecommendationResponse>,
    loading: bool,
    // Shown by the client's error banner; handlers return the cause instead.
    #[cfg_attr(not(test), allow(dead_code))]
    error: Option<String>,
}

impl<S: SessionStore> CareerApp<S> {
    /// Restores the signed-in user from `store`.
    pub fn start(mut store: S) -> Result<Self, StoreError> {
        let user = session::load_user(&mut store)?;
        if let Some(user) = &user {
            info!("Restored session for {}", user.email);
        }
        Ok(Self {
            store,
            user,
            profile: None,
            recommendations: None,
            loading: false,
            error: None,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn recommendations(&self) -> Option<&RecommendationResponse> {
        self.recommendations.as_ref()
    }

    /// A fresh form, pre-seeded with the signed-in user's name.
    pub fn form(&self) -> ProfileForm {
        ProfileForm::new(self.user.as_ref().map(|u| u.name.as_str()))
    }

    /// Dashboard for the current recommendations, if any.
    pub fn dashboard(&self) -> Option<Dashboard> {
        self.recommendations.as_ref().map(Dashboard::new)
    }

    /// Submits a completed profile for recommendations. On failure the
    /// user-facing message is kept in `error` and the cause is returned.
    pub async fn complete_profile(
        &mut self,
        profile: UserProfile,
        advisor: &CareerAdvisor,
    ) -> Result<Submission, ServiceError> {
        let Some(in_flight) = InFlight::start(&mut self.loading) else {
            return Ok(Submission::Busy);
        };
        self.error = None;
        let profile = self.profile.insert(profile);

        let result = advisor.career_paths(profile).await;
        drop(in_flight);

        match result {
            Ok(recommendations) => {
                self.recommendations = Some(recommendations);
                Ok(Submission::Completed)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn login(
        &mut self,
        mode: AuthMode,
        name: Option<&str>,
        email: &str,
    ) -> Result<&AuthUser, StoreError> {
        let user = session::sign_in(mode, name, email);
        session::save_user(&mut self.store, &user)?;
        info!("Signed in {}", user.email);
        Ok(&*self.user.insert(user))
    }
}

// Screen transitions of the browser client. The HTTP surface is stateless,
// so outside tests nothing calls these.
#[cfg_attr(not(test), allow(dead_code))]
impl<S: SessionStore> CareerApp<S> {
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// "Start Over": clears profile, recommendations and error together.
    pub fn reset(&mut self) {
        self.profile = None;
        self.recommendations = None;
        self.error = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        if let Err(e) = session::clear_user(&mut self.store) {
            warn!("Could not clear stored session: {e}");
            return Err(e);
        }
        self.user = None;
        self.profile = None;
        self.recommendations = None;
        Ok(())
    }
}
