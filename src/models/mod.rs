//! Data models for the flashdeck session engine.
//!
//! - [`Entry`]/[`Definition`]: vocabulary items, and [`RawEntry`] for the dataset wire format
//! - [`SessionState`]: everything a running session knows, owned by [`Session`](crate::state::Session)
//! - [`Screen`]/[`CardView`]: what the frontend is asked to render
//! - [`Settings`]/[`Preferences`]: configuration and persisted user choices

pub mod config;
pub mod entry;
pub mod session_state;
pub mod view;

pub use config::{Preferences, Settings, Theme};
pub use entry::{Definition, Entry, RawDefinition, RawEntry};
pub use session_state::{Mode, SessionState, Ticket};
pub use view::{CardView, Screen};
