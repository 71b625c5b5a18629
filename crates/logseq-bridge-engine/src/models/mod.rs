pub mod element;

pub use element::{DATA_LINE, Element};
