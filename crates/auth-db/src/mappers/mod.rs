//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions for rows read from the database.

mod credential;
