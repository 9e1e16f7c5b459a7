//! Version resolution against published earthbuild releases
//!
//! This module turns a user-supplied version specifier into a single
//! concrete release tag.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│  Resolver   │
//! │  (fetch)    │     │  (select)   │
//! └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │ Releases API│     │   Semver    │
//! │ (paginated) │     │ (normalize) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: `ReleaseSource` trait and the paginated GitHub implementation
//! - [`resolver`]: specifier interpretation and release selection
//! - [`semver`]: shared tag/specifier normalization utilities
//! - [`error`]: error types for fetching and resolution
//! - [`types`]: common types like `Release` and `ResolvedVersion`

pub mod error;
pub mod resolver;
pub mod semver;
pub mod source;
pub mod types;
