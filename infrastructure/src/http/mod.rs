//! HTTP adapters for model services
//!
//! [`HttpModelClient`] implements the `ModelClient` port for every supported
//! provider kind from data alone: a request body template, auth headers and a
//! text selector. [`ReqwestSessionFactory`] hands out one pooled
//! `reqwest::Client` per batch of calls.

mod client;
mod session;
mod templates;

pub use client::HttpModelClient;
pub use session::{ReqwestSession, ReqwestSessionFactory};
pub use templates::{PROMPT_PLACEHOLDER, default_model, default_url};
