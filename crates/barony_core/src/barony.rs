//! Barony identifiers, controllers and state.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::rules::{
    BARONIES, INITIAL_CASTLES, INITIAL_FOOTMEN, INITIAL_KNIGHTS, INITIAL_LAND, INITIAL_POPULATION,
    MAX_CASTLES, MAX_FOOTMEN, MAX_GOLD, MAX_KNIGHTS, MAX_NAME_LEN, POPULATION_PER_GOLD,
};

/// Names of the baronies in roster order.
pub const ROSTER: [&str; BARONIES] = [
    "Beaumont",
    "Cavendish",
    "de la Pole",
    "de Vere",
    "Howard",
    "Neville",
    "Percy",
    "Villiers",
];

/// Index of a barony within the fixed roster.
///
/// Construction is checked, so every `BaronyId` is a valid index into the
/// game's per-barony arrays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct BaronyId(u8);

impl BaronyId {
    /// Create an identifier from a roster index.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidBarony`] if `index` is outside the roster.
    pub fn new(index: usize) -> Result<Self> {
        if index < BARONIES {
            Ok(Self(index as u8))
        } else {
            Err(GameError::InvalidBarony(index))
        }
    }

    /// Roster index of this barony.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every barony in roster order.
    #[must_use]
    pub fn roster() -> [Self; BARONIES] {
        std::array::from_fn(|index| Self(index as u8))
    }

    /// Iterate over every barony in roster order.
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        Self::roster().into_iter()
    }
}

impl TryFrom<usize> for BaronyId {
    type Error = GameError;

    fn try_from(index: usize) -> Result<Self> {
        Self::new(index)
    }
}

impl From<BaronyId> for usize {
    fn from(id: BaronyId) -> Self {
        id.index()
    }
}

impl std::fmt::Display for BaronyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Players know baronies by 1-based keys.
        write!(f, "{}", self.0 + 1)
    }
}

/// Who makes the decisions for a barony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ControllerKind {
    /// A person at the keyboard.
    Human,
    /// The built-in computer opponent.
    #[default]
    Computer,
    /// A player connected from elsewhere.
    Remote,
}

impl ControllerKind {
    /// Get the display name for this controller.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Computer => "computer",
            Self::Remote => "remote",
        }
    }
}

/// State of a single barony.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Barony {
    /// Name of the barony.
    pub name: String,
    /// Who decides this barony's orders and attacks.
    pub controller: ControllerKind,
    /// Land owned.
    pub land: i32,
    /// People living in the barony.
    pub population: i32,
    /// Gold in the treasury.
    pub gold: i32,
    /// Castles standing.
    pub castles: i32,
    /// Knights at home.
    pub knights: i32,
    /// Footmen at home.
    pub footmen: i32,
    /// Standing by land, 1 being the largest holder.
    pub rank: u32,
}

impl Barony {
    /// Create a barony with the standard starting values.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NameTooLong`] if `name` exceeds the name limit.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.chars().count() > MAX_NAME_LEN {
            return Err(GameError::NameTooLong(name));
        }
        Ok(Self::founded(name))
    }

    /// Starting values for a name already known to fit.
    pub(crate) fn founded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: ControllerKind::default(),
            land: INITIAL_LAND,
            population: INITIAL_POPULATION,
            gold: INITIAL_POPULATION / POPULATION_PER_GOLD,
            castles: INITIAL_CASTLES,
            knights: INITIAL_KNIGHTS,
            footmen: INITIAL_FOOTMEN,
            rank: 1,
        }
    }

    /// Cap gold, castles, knights and footmen at their ceilings.
    pub fn clamp_to_caps(&mut self) {
        self.gold = self.gold.min(MAX_GOLD);
        self.castles = self.castles.min(MAX_CASTLES);
        self.knights = self.knights.min(MAX_KNIGHTS);
        self.footmen = self.footmen.min(MAX_FOOTMEN);
    }

    /// Whether every quantity lies within its permitted range.
    #[must_use]
    pub fn is_within_limits(&self) -> bool {
        self.land >= 0
            && self.population >= 0
            && (0..=MAX_GOLD).contains(&self.gold)
            && (0..=MAX_CASTLES).contains(&self.castles)
            && (0..=MAX_KNIGHTS).contains(&self.knights)
            && (0..=MAX_FOOTMEN).contains(&self.footmen)
    }
}
