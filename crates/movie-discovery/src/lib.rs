//! # Movie Discovery
//!
//! The core of a movie search view: a query controller that debounces typed text, keeps a
//! page number and stays in sync with the URL in both directions, and a fetch gateway that
//! turns `(query, page)` into one request against the movie metadata API.
//!
//! ## Module Tour
//!
//! ### 1. The Controller ([`query_actor`])
//! A [`ViewModel`](view_actor::ViewModel) driven by a [`ViewActor`](view_actor::ViewActor).
//! Keystrokes, debounce expiries, page changes, navigation and fetch completions all arrive
//! as intents on one mailbox, so the state needs no locks.
//! - **Key items**: [`QueryController`](query_actor::QueryController),
//!   [`QueryIntent`](query_actor::QueryIntent), [`MemoryHistory`](query_actor::MemoryHistory).
//!
//! ### 2. The Gateway ([`gateway`])
//! Endpoint selection, request headers, response normalization, behind an
//! [`HttpTransport`](gateway::HttpTransport) seam.
//! - **Key items**: [`FetchGateway`](gateway::FetchGateway), [`FetchError`](gateway::FetchError).
//!
//! ### 3. The Interface ([`clients`])
//! [`DiscoveryClient`](clients::DiscoveryClient) wraps the generic client with one method per
//! user action.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`DiscoverySystem`](lifecycle::DiscoverySystem) wires the gateway into the controller's
//! context, starts the loop and stops it.
//!
//! ### Supporting modules
//! - [`model`] - movie records, URL parameters, the published snapshot
//! - [`config`] - environment-driven settings
//! - [`terminal`] - command parsing and text rendering for the binary
//!
//! ## Running
//!
//! ```bash
//! TMDB_API_KEY=... RUST_LOG=info cargo run -p movie-discovery -- '?query=batman&page=2'
//! ```

pub mod clients;
pub mod config;
pub mod gateway;
pub mod lifecycle;
pub mod model;
pub mod query_actor;
pub mod terminal;
