use std::sync::Arc;

use service::people::{repository::PeopleRepository, PeopleService};

/// Router state. Holds the single datastore handle shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub people: PeopleService,
}

impl AppState {
    pub fn new(repo: Arc<dyn PeopleRepository>) -> Self {
        Self { people: PeopleService::new(repo) }
    }
}
