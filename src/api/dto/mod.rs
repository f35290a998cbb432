pub mod stacks;

pub use stacks::ReorderStackRequest;
