use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Person, PersonInput};
use crate::errors::ServiceError;

/// Datastore for person records. Absence is `Ok(None)`, never an error.
#[async_trait]
pub trait PeopleRepository: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Person>, ServiceError>;
    async fn create(&self, input: PersonInput) -> Result<Person, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Person>, ServiceError>;
    /// Overwrite the fields present in `input`; returns the record after the write.
    async fn replace(&self, id: Uuid, input: PersonInput) -> Result<Option<Person>, ServiceError>;
    /// Remove the record; returns it as it was before removal.
    async fn delete(&self, id: Uuid) -> Result<Option<Person>, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MockPeopleRepository {
        people: RwLock<Vec<Person>>,
    }

    impl MockPeopleRepository {
        pub async fn len(&self) -> usize {
            self.people.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.people.read().await.is_empty()
        }
    }

    #[async_trait]
    impl PeopleRepository for MockPeopleRepository {
        async fn list(&self) -> Result<Vec<Person>, ServiceError> {
            Ok(self.people.read().await.clone())
        }

        async fn create(&self, input: PersonInput) -> Result<Person, ServiceError> {
            let person = input.into_person(Uuid::new_v4());
            self.people.write().await.push(person.clone());
            Ok(person)
        }

        async fn get(&self, id: Uuid) -> Result<Option<Person>, ServiceError> {
            Ok(self.people.read().await.iter().find(|p| p.id == id).cloned())
        }

        async fn replace(&self, id: Uuid, input: PersonInput) -> Result<Option<Person>, ServiceError> {
            let mut people = self.people.write().await;
            let Some(slot) = people.iter_mut().find(|p| p.id == id) else { return Ok(None) };
            *slot = input.apply_to(slot.clone());
            Ok(Some(slot.clone()))
        }

        async fn delete(&self, id: Uuid) -> Result<Option<Person>, ServiceError> {
            let mut people = self.people.write().await;
            let idx = people.iter().position(|p| p.id == id);
            Ok(idx.map(|idx| people.remove(idx)))
        }
    }
}
