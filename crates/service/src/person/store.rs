use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::person::domain::{CreatePersonInput, Person, UpdatePersonInput};
use crate::person::repository::PersonRepository;

/// In-memory person collection.
///
/// Keeps records in insertion order inside a `Vec` behind a single lock.
/// Nothing is persisted; every new store starts from the records it is given.
/// Shared by wrapping the store itself in an `Arc`.
#[derive(Default)]
pub struct PersonStore {
    inner: RwLock<Vec<Person>>,
}

impl PersonStore {
    pub fn new(persons: Vec<Person>) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(persons) })
    }

    /// Store pre-populated with [`Person::seed`].
    pub fn seeded() -> Arc<Self> {
        Self::new(Person::seed())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Apply a mutation to the collection while holding the write lock.
    async fn update_vec<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Vec<Person>) -> Result<T, ServiceError>,
    {
        let mut persons = self.inner.write().await;
        f(&mut persons)
    }
}

fn next_id(persons: &[Person]) -> u64 {
    persons.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

#[async_trait]
impl PersonRepository for PersonStore {
    async fn list(&self) -> Vec<Person> {
        self.inner.read().await.clone()
    }

    async fn get(&self, id: u64) -> Result<Person, ServiceError> {
        let persons = self.inner.read().await;
        persons
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("person"))
    }

    async fn create(&self, input: CreatePersonInput) -> Result<Person, ServiceError> {
        input.validate()?;
        let person = self
            .update_vec(|persons| {
                let person = input.into_person(next_id(persons))?;
                persons.push(person.clone());
                Ok(person)
            })
            .await?;
        info!(event = "person_created", id = person.id, "created person");
        Ok(person)
    }

    async fn update(&self, id: u64, input: UpdatePersonInput) -> Result<Person, ServiceError> {
        let person = self
            .update_vec(|persons| {
                let existing = persons
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| ServiceError::not_found("person"))?;
                input.apply(existing);
                Ok(existing.clone())
            })
            .await?;
        info!(event = "person_updated", id, "updated person");
        Ok(person)
    }

    async fn delete(&self, id: u64) -> Result<bool, ServiceError> {
        let removed = self
            .update_vec(|persons| {
                let before = persons.len();
                persons.retain(|p| p.id != id);
                Ok(before - persons.len())
            })
            .await?;
        if removed > 0 {
            info!(event = "person_deleted", id, removed, "deleted person");
        } else {
            debug!(event = "person_delete_noop", id, "no person to delete");
        }
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn input(name: &str) -> CreatePersonInput {
        CreatePersonInput {
            name: Some(Some(name.into())),
            address: Some("B".into()),
            phone_number: Some("1".into()),
            personnummer: Some("2".into()),
            account_balance: Some(0.0),
        }
    }

    #[tokio::test]
    async fn list_returns_seed_in_order() {
        let store = PersonStore::seeded();
        let ids: Vec<u64> = store.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn create_assigns_max_plus_one_and_round_trips() -> anyhow::Result<()> {
        let store = PersonStore::seeded();
        let created = store.create(input("A")).await?;
        assert_eq!(created.id, 3);
        let fetched = store.get(3).await?;
        assert_eq!(fetched, created);
        assert_eq!(fetched.address.as_deref(), Some("B"));
        assert_eq!(store.len().await, 3);
        Ok(())
    }

    #[tokio::test]
    async fn create_on_empty_store_starts_at_one() -> anyhow::Result<()> {
        let store = PersonStore::new(Vec::new());
        assert!(store.is_empty().await);
        assert_eq!(store.create(input("first")).await?.id, 1);
        Ok(())
    }

    #[tokio::test]
    async fn ids_stay_unique_across_creates_and_deletes() -> anyhow::Result<()> {
        let store = PersonStore::seeded();
        for i in 0..5 {
            store.create(input(&format!("p{i}"))).await?;
        }
        // Removing a middle and the max id must not let a later create collide.
        store.delete(4).await?;
        store.delete(7).await?;
        store.create(input("after")).await?;
        store.create(input("after2")).await?;
        let ids: Vec<u64> = store.list().await.into_iter().map(|p| p.id).collect();
        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_never_share_an_id() -> anyhow::Result<()> {
        let store = PersonStore::seeded();
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.create(input(&format!("c{i}"))).await }));
        }
        let mut ids = HashSet::new();
        for h in handles {
            assert!(ids.insert(h.await??.id));
        }
        assert_eq!(store.len().await, 34);
        Ok(())
    }

    #[tokio::test]
    async fn create_without_name_leaves_collection_unchanged() {
        let store = PersonStore::seeded();
        let res = store.create(CreatePersonInput::default()).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn get_and_update_unknown_id_are_not_found() {
        let store = PersonStore::seeded();
        assert!(matches!(store.get(9999).await, Err(ServiceError::NotFound(_))));
        let upd = UpdatePersonInput { name: Some(Some("X".into())), ..Default::default() };
        assert!(matches!(store.update(9999, upd).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_is_partial() -> anyhow::Result<()> {
        let store = PersonStore::seeded();
        let before = store.get(1).await?;
        let upd = UpdatePersonInput { name: Some(Some("X".into())), ..Default::default() };
        let after = store.update(1, upd).await?;
        assert_eq!(after.name.as_deref(), Some("X"));
        assert_eq!(after.address, before.address);
        assert_eq!(after.phone_number, before.phone_number);
        assert_eq!(after.personnummer, before.personnummer);
        assert_eq!(after.account_balance, before.account_balance);
        assert_eq!(store.get(1).await?, after);
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> anyhow::Result<()> {
        let store = PersonStore::seeded();
        assert!(store.delete(1).await?);
        assert!(!store.delete(1).await?);
        assert!(!store.delete(9999).await?);
        let ids: Vec<u64> = store.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_every_record_with_the_id() -> anyhow::Result<()> {
        let mut persons = Person::seed();
        let mut dup = persons[0].clone();
        dup.name = Some("Duplicate".into());
        persons.push(dup);
        let store = PersonStore::new(persons);
        assert!(store.delete(1).await?);
        assert_eq!(store.len().await, 1);
        Ok(())
    }
}
