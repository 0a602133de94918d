//! Control surface: sliders, particle dragging and the reset button.
//!
//! The surface never touches particle state. Every interaction becomes a
//! [`ControlCommand`] on a channel that the run loop drains between ticks.

use particula_core::config::{ControlConfig, InteractionConfig};
use particula_core::ControlCommand;
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKind {
    ForceRange,
    Amplifier,
    CollisionDamping,
}

impl SliderKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ForceRange => "FORCE_RANGE",
            Self::Amplifier => "AMPLIFIER",
            Self::CollisionDamping => "COLLISION_DAMPING",
        }
    }

    fn command(self, value: f64) -> ControlCommand {
        match self {
            Self::ForceRange => ControlCommand::SetForceRange(value),
            Self::Amplifier => ControlCommand::SetAmplifier(value),
            Self::CollisionDamping => ControlCommand::SetCollisionDamping(value),
        }
    }
}

/// A bounded value with a horizontal track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub kind: SliderKind,
    pub min: f64,
    pub max: f64,
    pub value: f64,
}

impl Slider {
    /// Stores `value` clamped into `[min, max]` and returns what was stored.
    pub fn set(&mut self, value: f64) -> f64 {
        self.value = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
        self.value
    }

    /// Maps a pointer offset along a track of `track_width` onto the slider range.
    pub fn set_from_track(&mut self, offset: f64, track_width: f64) -> f64 {
        if track_width <= 0.0 {
            return self.value;
        }
        self.set(self.min + offset * (self.max - self.min) / track_width)
    }

    /// Handle position along the track, for renderers.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.max > self.min {
            (self.value - self.min) / (self.max - self.min)
        } else {
            0.0
        }
    }
}

pub struct ControlSurface {
    sliders: [Slider; 3],
    active_slider: Option<SliderKind>,
    dragged_particle: Option<usize>,
    tx: Sender<ControlCommand>,
}

impl ControlSurface {
    pub fn new(limits: &ControlConfig, initial: &InteractionConfig, tx: Sender<ControlCommand>) -> Self {
        let slider = |kind, max, value: f64| Slider {
            kind,
            min: 0.0,
            max,
            value: value.clamp(0.0, max),
        };
        Self {
            sliders: [
                slider(SliderKind::ForceRange, limits.force_range_max, initial.force_range),
                slider(SliderKind::Amplifier, limits.amplifier_max, initial.amplifier),
                slider(
                    SliderKind::CollisionDamping,
                    limits.collision_damping_max,
                    initial.collision_damping,
                ),
            ],
            active_slider: None,
            dragged_particle: None,
            tx,
        }
    }

    #[must_use]
    pub fn slider(&self, kind: SliderKind) -> &Slider {
        &self.sliders[Self::slot(kind)]
    }

    #[must_use]
    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    fn slot(kind: SliderKind) -> usize {
        match kind {
            SliderKind::ForceRange => 0,
            SliderKind::Amplifier => 1,
            SliderKind::CollisionDamping => 2,
        }
    }

    /// Sets a slider directly, clamped to its range, and queues the change.
    pub fn set_slider(&mut self, kind: SliderKind, value: f64) -> f64 {
        let stored = self.sliders[Self::slot(kind)].set(value);
        tracing::debug!(slider = kind.label(), value = stored, "Slider moved");
        self.send(kind.command(stored));
        stored
    }

    pub fn grab_slider(&mut self, kind: SliderKind) {
        self.active_slider = Some(kind);
    }

    /// Moves the grabbed slider to a pointer offset along its track. No-op if none is grabbed.
    pub fn slide(&mut self, offset: f64, track_width: f64) -> Option<f64> {
        let kind = self.active_slider?;
        let stored = self.sliders[Self::slot(kind)].set_from_track(offset, track_width);
        self.send(kind.command(stored));
        Some(stored)
    }

    /// Starts dragging particle `index`, as found by a hit test on the latest snapshot.
    pub fn begin_drag(&mut self, index: usize) {
        self.dragged_particle = Some(index);
    }

    /// Queues a position override for the dragged particle.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        match self.dragged_particle {
            Some(index) => {
                self.send(ControlCommand::SetPosition { index, x, y });
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn dragged_particle(&self) -> Option<usize> {
        self.dragged_particle
    }

    /// Pointer released: ends both slider and particle drags.
    pub fn release(&mut self) {
        self.active_slider = None;
        self.dragged_particle = None;
    }

    pub fn press_reset(&mut self) {
        self.release();
        self.send(ControlCommand::Reset);
    }

    /// Pushes the live-tunable values of a reloaded config through the sliders.
    pub fn apply_reloaded(&mut self, interaction: &InteractionConfig) {
        for (kind, value) in [
            (SliderKind::ForceRange, interaction.force_range),
            (SliderKind::Amplifier, interaction.amplifier),
            (SliderKind::CollisionDamping, interaction.collision_damping),
        ] {
            if self.slider(kind).value != value {
                self.set_slider(kind, value);
            }
        }
    }

    fn send(&self, command: ControlCommand) {
        if self.tx.send(command).is_err() {
            tracing::warn!(?command, "Control channel closed; command dropped");
        }
    }
}
