pub use errors::*;
pub use grid::*;
pub use search::*;
pub use shapes::*;

#[cfg(test)]
mod arbitrary;
mod errors;
mod grid;
mod search;
mod shapes;
mod visualization;
