use anyhow::Result;

use crate::domain::{Member, SessionContext};
use crate::repository::members;
use crate::store::DocumentStore;

pub struct RosterService<'a, S: DocumentStore> {
    store: &'a S,
    session: &'a SessionContext,
}

impl<'a, S: DocumentStore> RosterService<'a, S> {
    pub fn new(store: &'a S, session: &'a SessionContext) -> Self {
        Self { store, session }
    }

    /// New members join on the session's selected date.
    pub async fn register(&self, name: &str, phone: Option<&str>) -> Result<Member> {
        members::insert_member(self.store, name, phone, self.session.selected_date).await
    }

    pub async fn edit(&self, id: &str, name: Option<&str>, phone: Option<&str>) -> Result<Member> {
        members::update_member(self.store, id, name, phone).await
    }

    pub async fn remove(&self, id: &str) -> Result<Member> {
        members::delete_member(self.store, id).await
    }

    pub async fn list(&self) -> Vec<Member> {
        let mut roster = members::list_all(self.store).await;
        roster.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{cleanup, temp_store};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_register_uses_session_date_and_lists_by_name() {
        let store = temp_store("roster_register");
        let date = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();
        let session = SessionContext::new(Some("admin".to_string()), date);
        let service = RosterService::new(&store, &session);

        service.register("Park", None).await.unwrap();
        let kim = service.register("Kim", Some("")).await.unwrap();

        assert_eq!(kim.join_date, date);
        assert_eq!(kim.phone, None);
        let names: Vec<String> = service.list().await.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Kim", "Park"]);
        cleanup(&store);
    }
}
