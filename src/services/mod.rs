pub mod session;
pub mod sim;
pub mod sink;
pub mod venue;
