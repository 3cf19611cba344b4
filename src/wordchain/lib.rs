//! # Wordchain Architecture
//!
//! Wordchain is a **vocabulary flashcard library**: words go in, a dictionary page is
//! scraped for their pronunciation, part of speech and definition, and a fixed
//! spaced-repetition ladder decides when each word comes back for review. The
//! `wordchain` binary is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Resolves config, identity and the tracing subscriber     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands and the dictionary             │
//! │  - Normalizes inputs (indexes / words → selectors)          │
//! └─────────────────────────────────────────────────────────────┘
//!                │                                 │
//!                ▼                                 ▼
//! ┌───────────────────────────────┐  ┌──────────────────────────┐
//! │  Command Layer (commands/)    │  │  Lookup (lookup/)        │
//! │  - Business logic, no I/O     │  │  - HTTP fetch + scraping │
//! │  - Scheduling via schedule.rs │  │  - Selector rule chains  │
//! └───────────────────────────────┘  └──────────────────────────┘
//!                │
//!                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - VocabularyRepository trait                               │
//! │  - FileRepository (production), InMemoryRepository (tests)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Users
//!
//! There is no global "current user". A [`model::UserContext`] is resolved once by
//! the client (see [`identity`]) and passed into every API call, which passes it on
//! to the repository. Files are keyed by the user id.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code returns `Result<CmdResult>` and never prints. The
//! only outbound I/O is the dictionary request, and it sits behind the
//! [`lookup::Dictionary`] trait so tests can swap it out.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`schedule`]: The review ladder, pure functions of (stage, grade, today)
//! - [`lookup`]: Dictionary scraping
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`VocabularyEntry`, `Stage`, `Settings`, `UserContext`)
//! - [`index`]: 1-based display indexes
//! - [`identity`]: Local user id resolution
//! - [`config`]: Layered configuration
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod identity;
pub mod index;
pub mod lookup;
pub mod model;
pub mod schedule;
pub mod store;
