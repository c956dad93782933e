//! Book lookup domain

mod entity;
mod repository;

pub use entity::{Book, Isbn};
pub use repository::BookRepository;

#[cfg(test)]
pub use repository::mock;
