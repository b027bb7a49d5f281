use crate::commandline::Commandline;
use crate::error::RelayError;
use clap::Parser;

mod broadcast;
mod clock;
mod commandline;
mod configuration;
mod connection;
mod context;
mod error;
mod identity;
mod infallible_stream;
mod message;
mod room;
mod server;
mod session;
mod store;
#[cfg(test)]
mod utils;

#[tokio::main]
async fn main() -> Result<(), RelayError> {
	Commandline::parse().run().await
}
