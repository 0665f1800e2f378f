//! Core value types shared by the executor, the store, and the HTTP front end.

pub mod command;
pub mod result;
