//! Pokémon species lookups against the PokeAPI GraphQL endpoint, served over
//! HTTP and shown in a small terminal view.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod query;
pub mod server;
pub mod ui;
pub mod utils;

pub use config::AppConfig;
pub use error::{FetchError, GraphqlError};
pub use fetch::{name_variables, GraphqlClient, Variables, POKEAPI_GRAPHQL_ENDPOINT};
pub use models::{PokemonSummary, SpeciesQueryResult, SpeciesRecord};
pub use server::{build_router, lookup_details, AppState, DetailsLookup};
