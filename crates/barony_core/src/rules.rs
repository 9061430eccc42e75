//! Numeric rules of the game.
//!
//! Every constant the resolvers depend on lives here so balance changes are
//! made in one place.

/// Number of baronies in every game.
pub const BARONIES: usize = 8;

/// Number of turns in a game.
pub const TURNS: u32 = 12;

/// Population needed to yield one gold of tax.
pub const POPULATION_PER_GOLD: i32 = 1;

/// Gold and population cost of building a castle.
pub const CASTLE_COST: i32 = 100;

/// Gold and population cost of training a knight.
pub const KNIGHT_COST: i32 = 10;

/// Gold and population cost of drafting a footman.
pub const FOOTMAN_COST: i32 = 1;

/// Upkeep of castles: `CASTLES_TAX` gold per `CASTLES_PER_TAX` castles.
pub const CASTLES_TAX: i32 = 10;
/// See [`CASTLES_TAX`].
pub const CASTLES_PER_TAX: i32 = 1;

/// Upkeep of knights: `KNIGHTS_TAX` gold per `KNIGHTS_PER_TAX` knights.
pub const KNIGHTS_TAX: i32 = 1;
/// See [`KNIGHTS_TAX`].
pub const KNIGHTS_PER_TAX: i32 = 1;

/// Upkeep of footmen: `FOOTMEN_TAX` gold per `FOOTMEN_PER_TAX` footmen.
pub const FOOTMEN_TAX: i32 = 1;
/// See [`FOOTMEN_TAX`].
pub const FOOTMEN_PER_TAX: i32 = 5;

/// Raw fighting strength of a knight, measured in footmen.
pub const KNIGHT_STRENGTH: i64 = 10;

/// Defensive strength of a castle, measured in footmen.
pub const CASTLE_DEFENCE: i64 = 100;

/// Footmen that count as one knight when deciding whether beaten castles
/// are taken or razed.
pub const FOOTMEN_PER_KNIGHT: i64 = 10;

/// Ceiling on a barony's gold.
pub const MAX_GOLD: i32 = 32000;

/// Ceiling on a barony's castles.
pub const MAX_CASTLES: i32 = 320;

/// Ceiling on a barony's knights.
pub const MAX_KNIGHTS: i32 = 3200;

/// Ceiling on a barony's footmen.
pub const MAX_FOOTMEN: i32 = 32000;

/// Starting land of every barony.
pub const INITIAL_LAND: i32 = 4000;

/// Starting population of every barony.
pub const INITIAL_POPULATION: i32 = 4000;

/// Starting castles of every barony.
pub const INITIAL_CASTLES: i32 = 40;

/// Starting knights of every barony.
pub const INITIAL_KNIGHTS: i32 = 400;

/// Starting footmen of every barony.
pub const INITIAL_FOOTMEN: i32 = 4000;

/// Longest permitted barony name.
pub const MAX_NAME_LEN: usize = 10;
