//! Service layer for the people resource.
//! - `people::repository` is the datastore seam; SeaORM and in-memory backends implement it.
//! - `people::service` turns raw request parts (path ids, body bytes) into repository calls.

pub mod errors;
pub mod people;
#[cfg(test)]
pub mod test_support;
