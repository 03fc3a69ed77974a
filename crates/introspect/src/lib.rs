//! GraphQL introspection: query text, response types, HTTP client, and SDL conversion.
//!
//! Introspected schemas are turned into SDL text so they can go through the
//! same parser as schema files.
//!
//! # Examples
//!
//! ```no_run
//! use graphql_introspect::{introspection_to_sdl, IntrospectionClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IntrospectionClient::new()
//!         .with_header("Authorization", "Bearer my-token")
//!         .with_timeout(Duration::from_secs(60))
//!         .with_retries(3);
//!
//!     let schema = client.execute("https://api.example.com/graphql").await?;
//!     println!("{}", introspection_to_sdl(&schema));
//!     Ok(())
//! }
//! ```
//!
//! A result saved to disk (with or without the `data` envelope) is read with
//! [`parse_introspection`].

mod client;
mod error;
mod query;
mod sdl;
mod types;

pub use client::{IntrospectionClient, TraceSink};
pub use error::{IntrospectionError, Result};
pub use query::{introspection_query, request_body, SpecVersion, INTROSPECTION_OPERATION};
pub use sdl::{introspection_to_sdl, Sdl};
pub use types::*;
