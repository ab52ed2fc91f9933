//! Host → worker message protocol

use mote_core::{HoverFlags, SimConfig};
use mote_render::Surface;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A render target that can be moved into the worker thread
pub type BoxedSurface = Box<dyn Surface + Send>;

/// Messages accepted by the simulation worker, processed in FIFO order
pub enum Message {
    /// Take ownership of `surface`, allocate the pool and start the loop
    Init {
        surface: BoxedSurface,
        config: SimConfig,
    },
    /// New canvas size in CSS pixels
    Resize { width: f32, height: f32 },
    /// Current hover flags; the latest message wins
    Hover(HoverFlags),
    /// Stop the loop and release the surface
    Dispose,
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init { config, .. } => f
                .debug_struct("Init")
                .field("config", config)
                .finish_non_exhaustive(),
            Self::Resize { width, height } => f
                .debug_struct("Resize")
                .field("width", width)
                .field("height", height)
                .finish(),
            Self::Hover(flags) => f.debug_tuple("Hover").field(flags).finish(),
            Self::Dispose => f.write_str("Dispose"),
        }
    }
}

/// The serializable subset of [`Message`], for scripted hosts.
///
/// Encoded with a `type` tag:
/// `{"type": "hover", "letter": true}`, `{"type": "resize", "width": 640, "height": 400}`,
/// `{"type": "dispose"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Resize { width: f32, height: f32 },
    Hover(HoverFlags),
    Dispose,
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        match command {
            Command::Resize { width, height } => Message::Resize { width, height },
            Command::Hover(flags) => Message::Hover(flags),
            Command::Dispose => Message::Dispose,
        }
    }
}
