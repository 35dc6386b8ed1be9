//! Data Transfer Objects between the front end and the dispatchers
//!
//! Requests are built by the command-line front end from parsed arguments
//! and handed to whichever dispatch strategy was selected. Results come back
//! the same way, independent of the strategy that produced them.

pub mod pipeline;
pub mod project;
