//! Domain types shared by every delivery channel.

mod error;
mod request;
mod response;
mod route;

pub use error::ChannelError;
pub use request::{ChannelRequest, EmailTemplate};
pub use response::ChannelResponse;
pub use route::ChannelRoute;
