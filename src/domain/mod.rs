//! Domain records exchanged with the HR/CRM backend.

pub mod attendance;
pub mod branch;
pub mod client;
pub mod credential;
pub mod employee;
pub mod list;
pub mod profile;
pub mod shift;
pub mod types;
