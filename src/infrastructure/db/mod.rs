pub mod activities;
pub mod connection;
pub mod core_values;
pub mod friends;
pub mod instances;
pub mod locations;
pub mod participations;
pub mod users;
