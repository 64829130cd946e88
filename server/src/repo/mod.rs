//! Database operations that span more than one statement or table.
//!
//! Handlers do single-table reads inline; anything transactional or shared
//! between handlers lives here.

pub mod recipes;
pub mod relations;
pub mod shopping_list;
pub mod subscriptions;
