//! FormCraft domain core.
//!
//! Pure domain logic for the form-builder backend: the canonical form
//! document model, shape normalization between legacy and paginated
//! representations, deterministic field-name derivation, the dual-write
//! preview cache, and the persistence gateway contract. This crate contains
//! no database or HTTP dependencies; the `db` and `api` crates plug into the
//! seams defined here.

pub mod cache;
pub mod draft;
pub mod embed;
pub mod error;
pub mod field;
pub mod form;
pub mod gateway;
pub mod memory;
pub mod naming;
pub mod normalize;
pub mod store;
pub mod submission;
pub mod template;
pub mod types;
