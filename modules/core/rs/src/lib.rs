pub use container::{Container, ElementOf, KeyOf, ValueOf};
pub use shape::{Identity, Mapped, Shape};

mod container;
mod shape;
