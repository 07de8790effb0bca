//! Tree and product data types

mod arena;
mod color;
mod node;
mod product;
mod value;

pub use arena::*;
pub use color::*;
pub use node::*;
pub use product::*;
pub use value::*;
