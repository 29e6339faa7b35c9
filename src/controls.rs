//! Egui control panel for a scene (requires the `egui` feature).
//!
//! Each widget maps onto exactly one scene command:
//!
//! | Widget | Command |
//! |--------|---------|
//! | Gravity slider | [`SceneCommand::SetGravity`] |
//! | Wind checkbox | [`SceneCommand::SetWind`] |
//! | Restart button | [`SceneCommand::Restart`] |
//! | Pause checkbox | [`SceneCommand::SetPaused`] |
//!
//! The panel posts through a [`SceneRemote`], so it can live on the UI
//! thread while the scene ticks elsewhere. Every command carries the state
//! the widget shows, so a stale panel never inverts the scene. Feed it the
//! scene's state with [`ControlsPanel::sync`] (for example from an
//! environment observer) and [`ControlsPanel::sync_paused`].

use crate::command::{SceneCommand, SceneRemote};
use crate::environment::{EnvironmentState, GravityRange};
use egui::Ui;

/// Gravity, wind, pause and restart controls.
pub struct ControlsPanel {
    remote: SceneRemote,
    range: GravityRange,
    gravity: f32,
    wind_enabled: bool,
    paused: bool,
}

impl ControlsPanel {
    /// Panel posting through `remote`, with the gravity slider spanning `range`.
    pub fn new(remote: SceneRemote, range: GravityRange) -> Self {
        Self {
            remote,
            gravity: range.clamp(range.default),
            range,
            wind_enabled: false,
            paused: false,
        }
    }

    /// Mirror the scene's current environment.
    pub fn sync(&mut self, env: &EnvironmentState) {
        self.gravity = env.gravity();
        self.wind_enabled = env.wind_enabled();
    }

    /// Mirror the scene's pause state.
    pub fn sync_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Gravity the slider shows.
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Whether the wind checkbox is ticked.
    pub fn wind_enabled(&self) -> bool {
        self.wind_enabled
    }

    /// Whether the pause checkbox is ticked.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Draw the panel. Returns `true` if any command was posted.
    pub fn show(&mut self, ui: &mut Ui) -> bool {
        let mut sent = false;

        ui.heading("Environment");

        if ui
            .add(egui::Slider::new(&mut self.gravity, self.range.min..=self.range.max).text("Gravity"))
            .changed()
        {
            sent |= self.remote.send(SceneCommand::SetGravity(self.gravity));
        }

        if ui.checkbox(&mut self.wind_enabled, "Wind").changed() {
            sent |= self.remote.send(SceneCommand::SetWind(self.wind_enabled));
        }

        ui.separator();

        ui.horizontal(|ui| {
            if ui.checkbox(&mut self.paused, "Paused").changed() {
                sent |= self.remote.send(SceneCommand::SetPaused(self.paused));
            }
            if ui.button("Restart").clicked() {
                sent |= self.remote.send(SceneCommand::Restart);
                // Restart puts gravity back to default and turns wind off.
                self.gravity = self.range.clamp(self.range.default);
                self.wind_enabled = false;
            }
        });

        sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandQueue;
    use glam::Vec3;

    #[test]
    fn test_sync_mirrors_environment() {
        let queue = CommandQueue::new();
        let mut panel = ControlsPanel::new(queue.remote(), GravityRange::default());
        assert_eq!(panel.gravity(), -9.8);

        let mut env = EnvironmentState::new(-4.0, Vec3::X);
        env.set_wind(true, 500.0);
        panel.sync(&env);

        assert_eq!(panel.gravity(), -4.0);
        assert!(panel.wind_enabled());

        panel.sync_paused(true);
        assert!(panel.paused());
    }
}
