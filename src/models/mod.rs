//! Data models for the metadata console.
//!
//! `metadata` holds the wire shapes of the `/metadata` resource, `view_state`
//! the serializable list view state, `edit` the edit buffer, and `notice` the
//! messages and confirmation prompts shown to the user.

pub mod edit;
pub mod metadata;
pub mod notice;
pub mod view_state;
