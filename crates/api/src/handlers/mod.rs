//! Request handlers.
//!
//! Handlers stay thin: they delegate to the form store or the submission
//! gateway and map errors via [`crate::error::AppError`].

pub mod form;
pub mod preview;
pub mod submission;
pub mod template;
