mod response;
mod trip;
mod user;
mod validation;

pub use response::*;
pub use trip::*;
pub use user::*;
pub(crate) use validation::{blank_as_none, ordered_messages};
