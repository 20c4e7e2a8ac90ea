//! Key bindings and scripted input
//!
//! The simulation only ever sees `InputSnapshot`s. This module turns "which
//! keys are held right now" into one, using a configurable layout.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{ABILITY_SLOTS, FighterInput, InputSnapshot};

/// A letter or digit key (stored lowercase), as reported by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key(char);

impl Key {
    pub fn ch(c: char) -> Self {
        Key(c.to_ascii_lowercase())
    }
}

/// One player's controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerKeys {
    pub left: Key,
    pub right: Key,
    pub jump: Key,
    pub abilities: [Key; ABILITY_SLOTS],
    pub hypercharge: Key,
}

impl PlayerKeys {
    fn read(&self, held: &HashSet<Key>) -> FighterInput {
        FighterInput {
            left: held.contains(&self.left),
            right: held.contains(&self.right),
            jump: held.contains(&self.jump),
            abilities: self.abilities.map(|k| held.contains(&k)),
            hypercharge: held.contains(&self.hypercharge),
        }
    }
}

/// Full keyboard layout for both players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub players: [PlayerKeys; 2],
    pub reset: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            players: [
                PlayerKeys {
                    left: Key::ch('a'),
                    right: Key::ch('d'),
                    jump: Key::ch('w'),
                    abilities: [Key::ch('1'), Key::ch('2'), Key::ch('3')],
                    hypercharge: Key::ch('4'),
                },
                PlayerKeys {
                    left: Key::ch('j'),
                    right: Key::ch('l'),
                    jump: Key::ch('i'),
                    abilities: [Key::ch('7'), Key::ch('8'), Key::ch('9')],
                    hypercharge: Key::ch('0'),
                },
            ],
            reset: Key::ch('r'),
        }
    }
}

impl KeyBindings {
    /// Build the tick input from the set of held keys
    pub fn snapshot(&self, held: &HashSet<Key>) -> InputSnapshot {
        InputSnapshot {
            players: [self.players[0].read(held), self.players[1].read(held)],
            reset: held.contains(&self.reset),
        }
    }
}

/// One step of a scripted input sequence: hold `keys` for `frames` ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Held keys as characters, e.g. "d1" = move right + ability 1
    pub keys: String,
    pub frames: u32,
}

impl ScriptStep {
    pub fn held(&self) -> HashSet<Key> {
        self.keys.chars().filter(|c| c.is_ascii_alphanumeric()).map(Key::ch).collect()
    }
}

/// Parse a JSON list of script steps
pub fn parse_script(json: &str) -> serde_json::Result<Vec<ScriptStep>> {
    serde_json::from_str(json)
}

/// Expand a script into one snapshot per tick
pub fn expand_script(bindings: &KeyBindings, steps: &[ScriptStep]) -> Vec<InputSnapshot> {
    steps
        .iter()
        .flat_map(|step| {
            let snapshot = bindings.snapshot(&step.held());
            std::iter::repeat_n(snapshot, step.frames as usize)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let bindings = KeyBindings::default();
        let held: HashSet<Key> = [Key::ch('A'), Key::ch('2'), Key::ch('0'), Key::ch('i')].into();
        let input = bindings.snapshot(&held);

        assert!(input.players[0].left);
        assert!(!input.players[0].right);
        assert_eq!(input.players[0].abilities, [false, true, false]);
        assert!(!input.players[0].hypercharge);

        assert!(input.players[1].jump);
        assert!(input.players[1].hypercharge);
        assert!(!input.reset);
    }

    #[test]
    fn test_script_expansion() {
        let script = parse_script(r#"[{"keys": "d1", "frames": 3}, {"keys": "r", "frames": 1}]"#).unwrap();
        let inputs = expand_script(&KeyBindings::default(), &script);
        assert_eq!(inputs.len(), 4);
        assert!(inputs[0].players[0].right);
        assert!(inputs[2].players[0].abilities[0]);
        assert!(inputs[3].reset);
        assert!(!inputs[3].players[0].right);
    }
}
