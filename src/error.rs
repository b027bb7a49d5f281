use crate::configuration::ConfigurationError;
use crate::store::error::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
	#[error("Failed to load configuration: {0}")]
	Configuration(#[from] ConfigurationError),
	#[error("Failed to open the message store: {0}")]
	Store(#[from] StoreError),
	#[error("IO error while serving requests: {0}")]
	Server(#[from] std::io::Error),
}
