use crate::clock::SubmissionClock;
use crate::configuration::Configuration;
use crate::store::MessageStore;
use crate::store::error::StoreError;
use crate::store::sqlite::SqliteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApplicationContext {
	pub configuration: Configuration,
	pub clock: Arc<SubmissionClock>,
	pub store: Arc<dyn MessageStore>,
}

impl ApplicationContext {
	pub async fn new(configuration: Configuration) -> Result<ApplicationContext, StoreError> {
		let store = Arc::new(SqliteStore::new(&configuration.database_url).await?);

		Ok(Self {
			configuration,
			clock: Arc::new(SubmissionClock::default()),
			store,
		})
	}
}
