use crate::error::{KeResult, KeyEvolveError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

/// Discriminants index `FitnessConfig::finger_strength_scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyNode {
    pub id: String,
    pub hand: Hand,
    pub finger: Finger,
    pub row: i8,
    pub col: i8,
    pub x: f64, // Physical X coordinate (units ~1u key width)
    pub y: f64, // Physical Y coordinate
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyboardGeometry {
    name: String,
    keys: Vec<KeyNode>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct GeometryFile {
    #[serde(default)]
    name: String,
    keys: Vec<KeyNode>,
}

impl KeyboardGeometry {
    /// Sorts keys into canonical (row, col) order; chromosome slot `i`
    /// lands on `keys()[i]`.
    pub fn new(name: impl Into<String>, mut keys: Vec<KeyNode>) -> KeResult<Self> {
        if keys.is_empty() {
            return Err(KeyEvolveError::Geometry(
                "keyboard must define at least one key".to_string(),
            ));
        }

        keys.sort_by_key(|k| (k.row, k.col));

        let mut index = HashMap::with_capacity(keys.len());
        for (i, k) in keys.iter().enumerate() {
            if index.insert(k.id.clone(), i).is_some() {
                return Err(KeyEvolveError::Geometry(format!(
                    "duplicate key id '{}'",
                    k.id
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            keys,
            index,
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KeResult<Self> {
        let content = fs::read_to_string(path)?;
        let file: GeometryFile = serde_json::from_str(&content)?;
        let name = if file.name.is_empty() {
            "custom".to_string()
        } else {
            file.name
        };
        Self::new(name, file.keys)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> &[KeyNode] {
        &self.keys
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn key(&self, id: &str) -> Option<&KeyNode> {
        self.index.get(id).map(|&i| &self.keys[i])
    }

    /// Euclidean distance between two keys by id; `None` if either is unknown.
    pub fn distance(&self, id_a: &str, id_b: &str) -> Option<f64> {
        let a = self.key(id_a)?;
        let b = self.key(id_b)?;
        Some(distance_between(a, b))
    }
}

#[inline(always)]
pub fn distance_between(a: &KeyNode, b: &KeyNode) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

#[derive(Debug, Clone, Copy, Default, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
pub enum KnownKeyboard {
    #[default]
    #[strum(serialize = "ansi_60")]
    Ansi60,
    #[strum(serialize = "columnar_split")]
    ColumnarSplit,
    #[strum(serialize = "minimal_split")]
    MinimalSplit,
}

impl KnownKeyboard {
    /// Resolves a board name, falling back to the default geometry.
    pub fn from_name(name: &str) -> Self {
        Self::from_str(name.trim()).unwrap_or_else(|_| {
            let fallback = Self::default();
            warn!(
                "⚠️  Unknown keyboard '{}', falling back to '{}'",
                name, fallback
            );
            fallback
        })
    }

    pub fn geometry(&self) -> KeyboardGeometry {
        let keys = match self {
            Self::Ansi60 => ansi_60_keys(),
            Self::ColumnarSplit => split_keys(
                &[Finger::Pinky, Finger::Ring, Finger::Middle, Finger::Index, Finger::Index],
                &[0.3, 0.1, 0.0, 0.1, 0.2],
                3,
            ),
            Self::MinimalSplit => split_keys(
                &[Finger::Ring, Finger::Middle, Finger::Index, Finger::Index],
                &[0.1, 0.0, 0.1, 0.2],
                2,
            ),
        };
        KeyboardGeometry {
            name: self.to_string(),
            index: keys
                .iter()
                .enumerate()
                .map(|(i, k)| (k.id.clone(), i))
                .collect(),
            keys,
        }
    }
}

fn ansi_60_keys() -> Vec<KeyNode> {
    const ROWS: [(&str, f64); 3] = [("qwertyuiop", 0.0), ("asdfghjkl", 0.25), ("zxcvbnm", 0.75)];
    const FINGERS: [Finger; 10] = [
        Finger::Pinky,
        Finger::Ring,
        Finger::Middle,
        Finger::Index,
        Finger::Index,
        Finger::Index,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    let mut keys = Vec::with_capacity(26);
    for (row, (legends, offset)) in ROWS.iter().enumerate() {
        for (col, legend) in legends.chars().enumerate() {
            keys.push(KeyNode {
                id: format!("Key{}", legend.to_ascii_uppercase()),
                hand: if col < 5 { Hand::Left } else { Hand::Right },
                finger: FINGERS[col],
                row: row as i8,
                col: col as i8,
                x: col as f64 + offset,
                y: row as f64,
            });
        }
    }
    keys
}

/// Column-staggered split board. `fingers` and `stagger` describe the left
/// hand from the outer column inward; the right hand mirrors them.
fn split_keys(fingers: &[Finger], stagger: &[f64], thumbs_per_hand: usize) -> Vec<KeyNode> {
    const HAND_GAP: f64 = 2.0;
    let cols = fingers.len();
    let mut keys = Vec::with_capacity(cols * 6 + thumbs_per_hand * 2);

    for row in 0..3 {
        for c in 0..cols * 2 {
            let (hand, inner) = if c < cols {
                (Hand::Left, c)
            } else {
                (Hand::Right, cols * 2 - 1 - c)
            };
            let gap = if hand == Hand::Right { HAND_GAP } else { 0.0 };
            keys.push(KeyNode {
                id: format!("r{}c{}", row, c),
                hand,
                finger: fingers[inner],
                row: row as i8,
                col: c as i8,
                x: c as f64 + gap,
                y: row as f64 + stagger[inner],
            });
        }
    }

    for t in 0..thumbs_per_hand {
        let left_col = cols - thumbs_per_hand + t;
        let right_col = cols + t;
        for (hand, col) in [(Hand::Left, left_col), (Hand::Right, right_col)] {
            let gap = if hand == Hand::Right { HAND_GAP } else { 0.0 };
            keys.push(KeyNode {
                id: format!("t{}", col),
                hand,
                finger: Finger::Thumb,
                row: 3,
                col: col as i8,
                x: col as f64 + 0.5 + gap,
                y: 3.3,
            });
        }
    }

    keys.sort_by_key(|k| (k.row, k.col));
    keys
}
