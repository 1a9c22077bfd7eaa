//! Process-local application store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use pagination::PageRequest;
use tokio::sync::RwLock;

use crate::domain::UserId;
use crate::domain::applications::{
    Application, ApplicationChanges, ApplicationFields, ApplicationFilter, ApplicationId,
};
use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};

/// [`ApplicationRepository`] backed by a map behind an async lock.
///
/// Used when no database is configured and by tests. Contents are lost on
/// restart.
pub struct InMemoryApplicationStore {
    records: RwLock<HashMap<ApplicationId, Application>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryApplicationStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryApplicationStore {
    /// Empty store stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of records across all owners.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records at all.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn newest_first(a: &Application, b: &Application) -> std::cmp::Ordering {
    b.updated_at
        .cmp(&a.updated_at)
        .then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationStore {
    async fn insert(
        &self,
        owner: &UserId,
        fields: &ApplicationFields,
    ) -> Result<Application, ApplicationRepositoryError> {
        let now = self.clock.utc();
        let record = Application {
            id: ApplicationId::random(),
            owner: owner.clone(),
            fields: fields.clone(),
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_page(
        &self,
        filter: &ApplicationFilter,
        page: &PageRequest,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let records = self.records.read().await;
        let mut selected: Vec<&Application> =
            records.values().filter(|record| filter.matches(record)).collect();
        selected.sort_by(|a, b| newest_first(a, b));

        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(selected.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self, filter: &ApplicationFilter) -> Result<u64, ApplicationRepositoryError> {
        let records = self.records.read().await;
        let matching = records.values().filter(|record| filter.matches(record)).count();
        Ok(u64::try_from(matching).unwrap_or(u64::MAX))
    }

    async fn find_one(
        &self,
        owner: &UserId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let records = self.records.read().await;
        Ok(records
            .get(id)
            .filter(|record| &record.owner == owner)
            .cloned())
    }

    async fn update_one(
        &self,
        owner: &UserId,
        id: &ApplicationId,
        changes: &ApplicationChanges,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(id).filter(|record| &record.owner == owner) else {
            return Ok(None);
        };
        changes.apply_to(&mut record.fields);
        record.updated_at = self.clock.utc();
        Ok(Some(record.clone()))
    }

    async fn delete_one(
        &self,
        owner: &UserId,
        id: &ApplicationId,
    ) -> Result<bool, ApplicationRepositoryError> {
        let mut records = self.records.write().await;
        if records.get(id).is_none_or(|record| &record.owner != owner) {
            return Ok(false);
        }
        Ok(records.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::applications::{
        ApplicationListQuery, ApplicationPayload, build_filter, validate_update,
    };
    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    struct StepClock(Mutex<DateTime<Utc>>);

    impl Clock for StepClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            let mut now = self.0.lock().expect("clock lock");
            *now += Duration::seconds(1);
            *now
        }
    }

    #[fixture]
    fn store() -> InMemoryApplicationStore {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .expect("valid instant");
        InMemoryApplicationStore::with_clock(Arc::new(StepClock(Mutex::new(start))))
    }

    fn filter(owner: &UserId, query: &ApplicationListQuery) -> ApplicationFilter {
        build_filter(owner.clone(), query).expect("valid filter")
    }

    #[rstest]
    #[tokio::test]
    async fn pages_are_newest_first_and_owner_scoped(store: InMemoryApplicationStore) {
        let owner = UserId::random();
        let stranger = UserId::random();
        for company in ["First", "Second", "Third"] {
            store
                .insert(&owner, &ApplicationFields::new(company, "Engineer"))
                .await
                .expect("insert");
        }
        store
            .insert(&stranger, &ApplicationFields::new("Hidden", "Engineer"))
            .await
            .expect("insert");

        let mine = filter(&owner, &ApplicationListQuery::default());
        let first_page = store
            .find_page(&mine, &PageRequest::new(1, 2))
            .await
            .expect("page");
        let companies: Vec<&str> = first_page.iter().map(|r| r.fields.company.as_str()).collect();
        assert_eq!(companies, ["Third", "Second"]);

        let second_page = store
            .find_page(&mine, &PageRequest::new(2, 2))
            .await
            .expect("page");
        assert_eq!(second_page.len(), 1);
        assert_eq!(store.count(&mine).await.expect("count"), 3);
        assert_eq!(store.len().await, 4);
    }

    #[rstest]
    #[tokio::test]
    async fn update_bumps_timestamp_and_moves_record_to_front(store: InMemoryApplicationStore) {
        let owner = UserId::random();
        let older = store
            .insert(&owner, &ApplicationFields::new("Older", "Engineer"))
            .await
            .expect("insert");
        store
            .insert(&owner, &ApplicationFields::new("Newer", "Engineer"))
            .await
            .expect("insert");

        let payload: ApplicationPayload =
            serde_json::from_str(r#"{"status":"Interview"}"#).expect("json");
        let changes = validate_update(&payload).expect("valid changes");
        let updated = store
            .update_one(&owner, &older.id, &changes)
            .await
            .expect("update")
            .expect("owned record");
        assert!(updated.updated_at > older.updated_at);
        assert_eq!(updated.created_at, older.created_at);

        let page = store
            .find_page(&filter(&owner, &ApplicationListQuery::default()), &PageRequest::default())
            .await
            .expect("page");
        assert_eq!(page.first().map(|r| r.id), Some(older.id));
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_records_are_invisible_to_every_operation(store: InMemoryApplicationStore) {
        let owner = UserId::random();
        let intruder = UserId::random();
        let record = store
            .insert(&owner, &ApplicationFields::new("Acme", "Engineer"))
            .await
            .expect("insert");

        assert!(store.find_one(&intruder, &record.id).await.expect("find").is_none());
        assert!(
            store
                .update_one(&intruder, &record.id, &ApplicationChanges::default())
                .await
                .expect("update")
                .is_none()
        );
        assert!(!store.delete_one(&intruder, &record.id).await.expect("delete"));
        assert!(store.delete_one(&owner, &record.id).await.expect("delete"));
        assert!(store.is_empty().await);
    }
}
