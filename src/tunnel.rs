//! Delivery of game messages to a front end
//!
//! This module defines the trait a front end implements to receive what
//! the game wants displayed. The game never renders anything itself; it
//! only pushes messages through a tunnel.

use super::{SyncMessage, UpdateMessage};

/// Trait for sending messages to the player's front end
///
/// Implementations might print to a terminal, forward to a browser over
/// a socket, or record messages in tests.
pub trait Tunnel {
    /// Sends an incremental update
    ///
    /// # Arguments
    ///
    /// * `message` - The update message to send
    fn send_message(&self, message: &UpdateMessage);

    /// Sends the full state of the game
    ///
    /// Used when a view needs to redraw from scratch.
    ///
    /// # Arguments
    ///
    /// * `state` - The synchronization message to send
    fn send_state(&self, state: &SyncMessage);

    /// Closes the tunnel once the player leaves
    fn close(self);
}
