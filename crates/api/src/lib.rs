pub mod artifact;
pub mod bot;
pub mod http;
pub mod quiz;
pub mod review;

mod transport;

pub use bot::Bot;
pub use model;
pub use registry::Registry;
pub use transport::Transport;
