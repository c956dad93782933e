//! Domain layer - Core entities and repository traits

pub mod book;
pub mod error;
pub mod greeting;

pub use book::{Book, BookRepository, Isbn};
pub use error::DomainError;
pub use greeting::{Greeting, GreetingCounter};
