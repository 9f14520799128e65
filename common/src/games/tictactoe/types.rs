use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn to_wire(&self) -> Option<&'static str> {
        match self {
            Mark::X => Some("X"),
            Mark::O => Some("O"),
            Mark::Empty => None,
        }
    }
}

// Wire encoding: "X", "O", or null for an empty cell. Board cells and the
// winner field both rely on this mapping.
impl Serialize for Mark {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_wire() {
            Some(value) => serializer.serialize_str(value),
            None => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for Mark {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarkVisitor;

        impl<'de> Visitor<'de> for MarkVisitor {
            type Value = Mark;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("\"X\", \"O\" or null")
            }

            fn visit_str<E>(self, value: &str) -> Result<Mark, E>
            where
                E: de::Error,
            {
                match value {
                    "X" => Ok(Mark::X),
                    "O" => Ok(Mark::O),
                    _ => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
                }
            }

            fn visit_unit<E>(self) -> Result<Mark, E>
            where
                E: de::Error,
            {
                Ok(Mark::Empty)
            }

            fn visit_none<E>(self) -> Result<Mark, E>
            where
                E: de::Error,
            {
                Ok(Mark::Empty)
            }
        }

        deserializer.deserialize_any(MarkVisitor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}
