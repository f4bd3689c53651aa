pub mod command;
pub mod rcon;
