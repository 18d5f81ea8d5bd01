pub mod error;
pub mod monoid;
pub mod path;
pub mod predecessors;
