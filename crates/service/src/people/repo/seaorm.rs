use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use models::person;

use crate::errors::ServiceError;
use crate::people::domain::{Person, PersonInput};
use crate::people::repository::PeopleRepository;

/// PostgreSQL-backed repository. Replace and delete lock the row inside a
/// transaction so the returned record is the one actually written or removed.
#[derive(Clone)]
pub struct SeaOrmPeopleRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPeopleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl PeopleRepository for SeaOrmPeopleRepository {
    async fn list(&self) -> Result<Vec<Person>, ServiceError> {
        let rows = person::Entity::find()
            .order_by_asc(person::Column::CreatedAt)
            .order_by_asc(person::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn create(&self, input: PersonInput) -> Result<Person, ServiceError> {
        let fresh = input.into_person(Uuid::new_v4());
        let am = person::ActiveModel {
            id: Set(fresh.id),
            null_fields: Set(fresh.null_mask()),
            name: Set(fresh.name.flatten()),
            image: Set(fresh.image.flatten()),
            title: Set(fresh.title.flatten()),
            created_at: Set(Utc::now().into()),
        };
        let created = am.insert(&self.db).await?;
        Ok(created.into())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Person>, ServiceError> {
        let row = person::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Person::from))
    }

    async fn replace(&self, id: Uuid, input: PersonInput) -> Result<Option<Person>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(row) = person::Entity::find_by_id(id).lock_exclusive().one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };
        if input.is_empty() {
            txn.commit().await?;
            return Ok(Some(row.into()));
        }

        let mut am: person::ActiveModel = row.clone().into();
        let next = input.apply_to(row.into());
        am.null_fields = Set(next.null_mask());
        am.name = Set(next.name.flatten());
        am.image = Set(next.image.flatten());
        am.title = Set(next.title.flatten());
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Person>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(row) = person::Entity::find_by_id(id).lock_exclusive().one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };
        person::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(Some(row.into()))
    }
}
