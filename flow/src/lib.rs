#![deny(unreachable_pub)]

//! Screen-flow core for the questline client: the navigation state machine,
//! the session context that survives screen changes, field validation, and
//! the static catalogs (roles, personas, challenge options) the screens
//! render. No UI types live here; the terminal front end consumes this
//! crate and keeps all presentation state to itself.

pub mod challenge;
pub mod dashboard;
pub mod nav;
pub mod otp;
pub mod persona;
pub mod profile;
pub mod role;
pub mod validate;

pub use nav::Flow;
pub use nav::FlowEvent;
pub use nav::OtpPurpose;
pub use nav::Screen;
pub use nav::SessionContext;
pub use nav::transition;
pub use role::Role;
