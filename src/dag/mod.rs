mod node;
mod propagate;

pub use node::*;
pub use propagate::*;
