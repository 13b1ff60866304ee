//! # Shopwise
//!
//! Retrieval-augmented product recommendations: a small in-memory catalog,
//! an LLM that reads the shopper's intent and explains the picks, and
//! optional translation into regional languages.
//!
//! The recommendation logic lives in [`shopwise_core`]. This crate supplies
//! the pieces that touch the outside world: TOML configuration, an
//! OpenAI-compatible LLM client, the LLM-backed collaborators, the JSON
//! catalog loader, and the `shopwise` CLI commands.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐   ┌────────────────┐
//! │ catalog.json │──▶│     CatalogStore      │◀──│ Retriever/Rank │
//! └──────────────┘   └──────────────────────┘   └───────┬────────┘
//!                                                        │
//!                    ┌──────────────────────┐            ▼
//!                    │  LlmClient (HTTP)    │◀── intent / reasoning /
//!                    │  chat completions    │    translate / describe
//!                    └──────────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`llm`] | Chat completions client (text + vision) |
//! | [`prompts`] | Prompt text for each collaborator |
//! | [`intent`] | LLM intent extraction and tolerant parsing |
//! | [`reasoning`] | LLM recommendation and comparison |
//! | [`translator`] | LLM translation |
//! | [`describe`] | LLM product descriptions |
//! | [`catalog_file`] | JSON catalog loading |
//! | [`recommend`] | Pipeline wiring and the `recommend`/`describe` commands |

pub mod catalog_file;
pub mod categories;
pub mod config;
pub mod describe;
pub mod intent;
pub mod llm;
pub mod prompts;
pub mod reasoning;
pub mod recommend;
pub mod translate_cmd;
pub mod translator;

pub use shopwise_core;
