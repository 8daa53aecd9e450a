pub mod dispatch;

pub use dispatch::CommandDispatch;
