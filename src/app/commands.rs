//! Inbound commands to the application service.
//!
//! The periodic tasks translate what they observe (a filtered level, a
//! decoded remote trace) into these and hand them to the
//! [`AppService`](super::service::AppService).

use crate::remote::DecodedCommand;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// A fresh filtered water level in millimetres (control task).
    RainLevel(f32),

    /// The result of one decode attempt (remote task).
    Remote(DecodedCommand),
}
