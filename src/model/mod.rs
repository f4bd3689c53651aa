//! Data transfer objects exchanged with the admin panel and order fulfilment.

pub mod api;
pub mod command;
pub mod rcon;
