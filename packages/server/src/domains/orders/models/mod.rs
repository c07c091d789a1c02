mod order;

pub use order::{states, Order, OrderStatus};
