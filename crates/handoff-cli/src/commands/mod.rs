pub mod connect;
pub mod connections;
pub mod context;
pub mod delete;
pub mod list;
