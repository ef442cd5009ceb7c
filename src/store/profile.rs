use serde::{Deserialize, Serialize};
use tracing::info;

use super::kv::KeyValueStore;
use crate::{
    error::{PlannerError, Result},
    types::TripPlan,
};

/// Store key holding the serialized profile.
pub const PROFILE_KEY: &str = "tripforme_user";

/// Signed-in user with saved trips, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub is_logged_in: bool,
    #[serde(default)]
    pub trips: Vec<TripPlan>,
}

/// Profile persistence on top of a key-value store.
#[derive(Debug)]
pub struct ProfileRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> Result<Option<UserProfile>> {
        self.store
            .get(PROFILE_KEY)?
            .map(|blob| serde_json::from_str(&blob).map_err(PlannerError::from))
            .transpose()
    }

    fn save(&self, profile: &UserProfile) -> Result<()> {
        self.store
            .set(PROFILE_KEY, serde_json::to_string(profile)?)
    }

    /// Sign in, keeping any trips already stored for this session.
    pub fn login(&self, name: impl Into<String>, email: impl Into<String>) -> Result<UserProfile> {
        let trips = self.load()?.map(|profile| profile.trips).unwrap_or_default();
        let profile = UserProfile {
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            is_logged_in: true,
            trips,
        };
        self.save(&profile)?;
        info!(email = %profile.email, trips = profile.trips.len(), "User logged in");
        Ok(profile)
    }

    /// Sign out and forget the stored profile.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(PROFILE_KEY)
    }

    fn logged_in(&self) -> Result<UserProfile> {
        self.load()?
            .filter(|profile| profile.is_logged_in)
            .ok_or_else(|| PlannerError::Validation("log in to save trips".to_string()))
    }

    /// Put `plan` at the front of the saved list. Saving a plan again moves
    /// it to the front instead of duplicating it.
    pub fn save_trip(&self, plan: &TripPlan) -> Result<UserProfile> {
        let mut profile = self.logged_in()?;
        profile.trips.retain(|trip| trip.id != plan.id);
        profile.trips.insert(0, plan.clone());
        self.save(&profile)?;
        info!(plan_id = %plan.id, saved = profile.trips.len(), "Trip saved");
        Ok(profile)
    }

    /// Remove a saved trip. Returns whether anything was removed.
    pub fn delete_trip(&self, id: &str) -> Result<bool> {
        let Some(mut profile) = self.load()? else {
            return Ok(false);
        };
        let before = profile.trips.len();
        profile.trips.retain(|trip| trip.id != id);
        if profile.trips.len() == before {
            return Ok(false);
        }
        self.save(&profile)?;
        Ok(true)
    }

    pub fn find_trip(&self, id: &str) -> Result<Option<TripPlan>> {
        Ok(self
            .load()?
            .and_then(|profile| profile.trips.into_iter().find(|trip| trip.id == id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::TripPlanPayload;

    fn plan(destination: &str) -> TripPlan {
        TripPlan::from_payload(TripPlanPayload::default(), destination)
    }

    #[test]
    fn save_requires_login() {
        let repo = ProfileRepository::new(MemoryStore::new());
        let err = repo.save_trip(&plan("Goa, India")).unwrap_err();
        assert!(matches!(err, PlannerError::Validation(_)));
    }

    #[test]
    fn saved_trips_are_newest_first() {
        let repo = ProfileRepository::new(MemoryStore::new());
        repo.login("Google User", "user@gmail.com").unwrap();

        let first = plan("Goa, India");
        let second = plan("Leh, India");
        repo.save_trip(&first).unwrap();
        let profile = repo.save_trip(&second).unwrap();

        let ids: Vec<&str> = profile.trips.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);

        let again = repo.save_trip(&first).unwrap();
        assert_eq!(again.trips.len(), 2);
        assert_eq!(again.trips[0].id, first.id);
    }

    #[test]
    fn login_keeps_trips_and_logout_forgets_profile() {
        let repo = ProfileRepository::new(MemoryStore::new());
        repo.login("A", "a@example.com").unwrap();
        let saved = plan("Ooty, India");
        repo.save_trip(&saved).unwrap();

        let profile = repo.login("B", "b@example.com").unwrap();
        assert_eq!(profile.trips.len(), 1);
        assert_eq!(repo.find_trip(&saved.id).unwrap().map(|t| t.id), Some(saved.id.clone()));

        repo.logout().unwrap();
        assert!(repo.load().unwrap().is_none());
        assert!(repo.find_trip(&saved.id).unwrap().is_none());
    }

    #[test]
    fn delete_reports_whether_trip_existed() {
        let repo = ProfileRepository::new(MemoryStore::new());
        assert!(!repo.delete_trip("missing").unwrap());

        repo.login("A", "a@example.com").unwrap();
        let saved = plan("Hampi, India");
        repo.save_trip(&saved).unwrap();

        assert!(repo.delete_trip(&saved.id).unwrap());
        assert!(!repo.delete_trip(&saved.id).unwrap());
        assert!(repo.load().unwrap().unwrap().trips.is_empty());
    }

    #[test]
    fn profile_blob_uses_camel_case() {
        let store = MemoryStore::new();
        let repo = ProfileRepository::new(store);
        repo.login("A", "a@example.com").unwrap();

        let blob = repo.store().get(PROFILE_KEY).unwrap().unwrap();
        assert!(blob.contains("\"isLoggedIn\":true"));
    }
}
