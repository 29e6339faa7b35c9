//! Commands from UI threads, applied on the tick thread.
//!
//! UI callbacks may fire on a different thread from the simulation loop. They
//! never touch the scene directly: they hold a [`SceneRemote`] and post
//! [`SceneCommand`]s, which the orchestrator drains at the start of the next
//! tick. A command therefore never lands in the middle of a sweep or a
//! restart.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// A parameter change requested by the UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneCommand {
    SetGravity(f32),
    ToggleWind,
    /// Wind on or off regardless of its current state.
    SetWind(bool),
    Restart,
    SetPaused(bool),
}

/// Cloneable, thread-safe handle for posting commands to a scene.
#[derive(Clone, Debug)]
pub struct SceneRemote {
    tx: Sender<SceneCommand>,
}

impl SceneRemote {
    /// Queue a command. Returns `false` if the scene is gone.
    pub fn send(&self, command: SceneCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    /// Queue [`SceneCommand::SetGravity`].
    pub fn set_gravity(&self, gravity: f32) -> bool {
        self.send(SceneCommand::SetGravity(gravity))
    }

    /// Queue [`SceneCommand::ToggleWind`].
    pub fn toggle_wind(&self) -> bool {
        self.send(SceneCommand::ToggleWind)
    }

    /// Queue [`SceneCommand::SetWind`].
    pub fn set_wind(&self, enabled: bool) -> bool {
        self.send(SceneCommand::SetWind(enabled))
    }

    /// Queue [`SceneCommand::Restart`].
    pub fn restart(&self) -> bool {
        self.send(SceneCommand::Restart)
    }

    /// Queue [`SceneCommand::SetPaused`].
    pub fn set_paused(&self, paused: bool) -> bool {
        self.send(SceneCommand::SetPaused(paused))
    }
}

/// Receiving end, owned by the orchestrator.
#[derive(Debug)]
pub(crate) struct CommandQueue {
    tx: Sender<SceneCommand>,
    rx: Receiver<SceneCommand>,
}

impl CommandQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub(crate) fn remote(&self) -> SceneRemote {
        SceneRemote {
            tx: self.tx.clone(),
        }
    }

    /// Everything queued so far, in send order.
    pub(crate) fn drain(&self) -> Vec<SceneCommand> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_drain_preserves_order() {
        let queue = CommandQueue::new();
        let remote = queue.remote();
        remote.set_gravity(-3.0);
        remote.toggle_wind();
        remote.set_wind(false);
        remote.restart();
        assert_eq!(
            queue.drain(),
            vec![
                SceneCommand::SetGravity(-3.0),
                SceneCommand::ToggleWind,
                SceneCommand::SetWind(false),
                SceneCommand::Restart,
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_remote_from_other_thread() {
        let queue = CommandQueue::new();
        let remote = queue.remote();
        thread::spawn(move || {
            for _ in 0..10 {
                remote.toggle_wind();
            }
        })
        .join()
        .unwrap();
        assert_eq!(queue.drain().len(), 10);
    }

    #[test]
    fn test_send_fails_after_drop() {
        let queue = CommandQueue::new();
        let remote = queue.remote();
        drop(queue);
        // The dropped queue held the only receiver.
        assert!(!remote.restart());
    }
}
