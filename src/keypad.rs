//! Manual distance/time entry driven by an on-screen keypad.
//!
//! Two fields are edited as digit strings: distance in metres and time in
//! minutes. One field is selected at a time and every key press edits the
//! selected field. A field is never empty; cleared fields read `"0"`.

use crate::config::{CURSOR, MAX_DISTANCE_DIGITS, MAX_TIME_DIGITS};
use crate::pace::manual_pace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Distance,
    Time,
}

impl Field {
    pub fn max_digits(self) -> usize {
        match self {
            Field::Distance => MAX_DISTANCE_DIGITS,
            Field::Time => MAX_TIME_DIGITS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Clear,
    Backspace,
}

impl Key {
    /// Map a keypad button label to a key.
    pub fn from_label(label: &str) -> Option<Key> {
        match label.trim() {
            "C" => Some(Key::Clear),
            "⇦" => Some(Key::Backspace),
            s => {
                let mut chars = s.chars();
                match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
                    (Some(d), None) => Some(Key::Digit(d as u8)),
                    _ => None,
                }
            }
        }
    }

    pub fn label(self) -> String {
        match self {
            Key::Digit(d) => d.to_string(),
            Key::Clear => "C".to_string(),
            Key::Backspace => "⇦".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keypad {
    distance: String,
    time: String,
    selected: Field,
}

impl Default for Keypad {
    fn default() -> Self {
        Self {
            distance: "0".to_string(),
            time: "0".to_string(),
            selected: Field::Distance,
        }
    }
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Field {
        self.selected
    }

    pub fn select(&mut self, field: Field) {
        self.selected = field;
    }

    fn digits_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Distance => &mut self.distance,
            Field::Time => &mut self.time,
        }
    }

    pub fn digits(&self, field: Field) -> &str {
        match field {
            Field::Distance => &self.distance,
            Field::Time => &self.time,
        }
    }

    /// Apply a key to the selected field. Returns whether the field changed.
    pub fn press(&mut self, key: Key) -> bool {
        let field = self.selected;
        let max = field.max_digits();
        let digits = self.digits_mut(field);
        let before = digits.clone();

        match key {
            Key::Digit(d) if d <= 9 => {
                if digits.len() < max {
                    if digits.as_str() == "0" {
                        digits.clear();
                    }
                    digits.push(char::from(b'0' + d));
                }
            }
            Key::Digit(_) => {}
            Key::Clear => {
                *digits = "0".to_string();
            }
            Key::Backspace => {
                digits.pop();
                if digits.is_empty() {
                    digits.push('0');
                }
            }
        }

        *digits != before
    }

    /// Numeric value of a field.
    pub fn value(&self, field: Field) -> u32 {
        // at most five ASCII digits, always fits
        self.digits(field).parse().unwrap_or(0)
    }

    /// Field text as shown, with the cursor marker on the selected field.
    pub fn display(&self, field: Field) -> String {
        let mut text = self.digits(field).to_string();
        if field == self.selected {
            text.push(CURSOR);
        }
        text
    }

    pub fn pace(&self) -> Option<u32> {
        manual_pace(self.value(Field::Distance), self.value(Field::Time))
    }
}
