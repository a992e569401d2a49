use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{parse_id, Person, PersonInput};
use super::repository::PeopleRepository;
use crate::errors::ServiceError;

/// People operations independent of the web framework. Each call parses its
/// raw inputs and makes exactly one repository call.
#[derive(Clone)]
pub struct PeopleService {
    repo: Arc<dyn PeopleRepository>,
}

impl PeopleService {
    pub fn new(repo: Arc<dyn PeopleRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Person>, ServiceError> {
        let people = self.repo.list().await?;
        info!(count = people.len(), "people_listed");
        Ok(people)
    }

    /// Create a person from a JSON body.
    ///
    /// # Examples
    /// ```
    /// use service::people::{PeopleService, repository::mock::MockPeopleRepository};
    /// use std::sync::Arc;
    /// let svc = PeopleService::new(Arc::new(MockPeopleRepository::default()));
    /// let p = tokio_test::block_on(svc.create(br#"{"name":"Ada"}"#)).unwrap();
    /// assert_eq!(p.name(), Some("Ada"));
    /// ```
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn create(&self, body: &[u8]) -> Result<Person, ServiceError> {
        let input = PersonInput::from_body(body)?;
        let person = self.repo.create(input).await?;
        info!(id = %person.id, "person_created");
        Ok(person)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<Person>, ServiceError> {
        let id = parse_id(id)?;
        self.repo.get(id).await
    }

    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn replace(&self, id: &str, body: &[u8]) -> Result<Option<Person>, ServiceError> {
        let id = parse_id(id)?;
        let input = PersonInput::from_body(body)?;
        let person = self.repo.replace(id, input).await?;
        info!(%id, found = person.is_some(), "person_replaced");
        Ok(person)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Option<Person>, ServiceError> {
        let id = parse_id(id)?;
        let person = self.repo.delete(id).await?;
        info!(%id, found = person.is_some(), "person_deleted");
        Ok(person)
    }
}
