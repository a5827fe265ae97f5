//! Gamepad button polling
//!
//! Immersive sessions expose their controllers as input sources, each with an
//! optional gamepad. Buttons are level-triggered; the [`ButtonEdgeDetector`]
//! remembers the last frame's states so actions fire once per press instead
//! of once per frame while held.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadButton {
    pub pressed: bool,
    pub touched: bool,
    /// Analog value in `0.0..=1.0`
    pub value: f32,
}

impl GamepadButton {
    pub fn new(pressed: bool) -> Self {
        Self {
            pressed,
            touched: pressed,
            value: if pressed { 1.0 } else { 0.0 },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gamepad {
    pub buttons: Vec<GamepadButton>,
}

/// One entry of a session's input sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSource {
    pub gamepad: Option<Gamepad>,
}

impl InputSource {
    /// Source whose gamepad reports the given pressed states
    pub fn with_buttons(pressed: &[bool]) -> Self {
        Self {
            gamepad: Some(Gamepad {
                buttons: pressed.iter().map(|&p| GamepadButton::new(p)).collect(),
            }),
        }
    }

    pub fn without_gamepad() -> Self {
        Self { gamepad: None }
    }
}

/// A button addressed by input source index and button index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonBinding {
    pub source: usize,
    pub button: usize,
}

impl ButtonBinding {
    pub const fn new(source: usize, button: usize) -> Self {
        Self { source, button }
    }
}

/// Detects not-pressed to pressed transitions between consecutive polls
#[derive(Debug, Default)]
pub struct ButtonEdgeDetector {
    previous: HashMap<usize, Vec<bool>>,
}

impl ButtonEdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every button that went down since the previous poll
    ///
    /// Buttons never seen before count as released. Sources without a
    /// gamepad keep whatever state they had.
    pub fn poll(&mut self, sources: &[InputSource]) -> Vec<ButtonBinding> {
        let mut rising = Vec::new();

        for (source, input) in sources.iter().enumerate() {
            let Some(gamepad) = &input.gamepad else {
                continue;
            };
            let current: Vec<bool> = gamepad.buttons.iter().map(|b| b.pressed).collect();
            let previous = self.previous.get(&source);

            for (button, &pressed) in current.iter().enumerate() {
                let was_pressed = previous
                    .and_then(|states| states.get(button).copied())
                    .unwrap_or(false);
                if pressed && !was_pressed {
                    log::trace!("button {} on source {} pressed", button, source);
                    rising.push(ButtonBinding::new(source, button));
                }
            }

            self.previous.insert(source, current);
        }

        rising
    }

    /// Whether `binding` was down at the last poll
    pub fn was_pressed(&self, binding: ButtonBinding) -> bool {
        self.previous
            .get(&binding.source)
            .and_then(|states| states.get(binding.button).copied())
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.previous.clear();
    }
}
