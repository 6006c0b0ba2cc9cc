pub mod config;
pub mod error;
pub mod fetch;
pub mod repo;

pub use crate::{
    config::Config,
    error::FetchError,
    fetch::FetchClient,
    repo::{Repo, ReviewQuery, ReviewsPayload},
};

/// Builds a [`Repo`] from the environment
pub fn connect() -> Result<(Config, Repo), FetchError> {
    let config = Config::load()?;
    let fetch = FetchClient::new(&config)?;

    Ok((config, Repo::new(fetch)))
}
