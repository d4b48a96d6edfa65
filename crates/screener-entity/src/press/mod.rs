//! Press link domain entities.

pub mod link;
pub mod model;
pub mod patch;
pub mod status;
pub mod view;

pub use link::watch_url;
pub use model::{NewPressLink, PressLink};
pub use patch::{Patch, PressLinkPatch};
pub use status::{LinkStatus, StatusFilter};
pub use view::PressLinkView;
