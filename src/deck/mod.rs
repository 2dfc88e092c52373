//! Link to the Stream Deck application: launch arguments, wire messages,
//! the WebSocket session and the rendering surface handed to the widgets.

pub mod args;
pub mod connection;
pub mod protocol;
pub mod surface;

pub use args::{build_cli, normalize_args, parse_launch_args, LaunchArgs, RegistrationInfo};
pub use connection::{read_events, run_plugin};
pub use protocol::{ActionEvent, ActionPayload, InboundEvent, OutboundMessage};
pub use surface::{ButtonSurface, HostSender};
