//! Canonical rule constants.
//!
//! Starting layout, clock and counter defaults, and the opponent roster used
//! when a new match is created.

use crate::game_state::chess_types::PieceKind;

/// Back-rank layout from the a-file to the h-file (same for both colors).
pub const INITIAL_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Seconds on each player's clock at the start of a match.
pub const GAME_TIMER_SECONDS: u32 = 300;

/// Starting value of the moves-remaining counter.
pub const MOVE_LIMIT: u16 = 50;

/// Maximum number of power-ups a player may hold at once.
pub const POWER_UP_CAPACITY: usize = 3;

/// Seconds added by Time Twist.
pub const TIME_TWIST_BONUS_SECONDS: u32 = 30;

/// Castling / en passant / clock fields appended to every encoded position.
pub const FEN_PLACEHOLDER_SUFFIX: &str = "KQkq - 0 1";

pub const OPPONENT_NAMES: [&str; 10] = [
    "Grave Digger",
    "Specter",
    "The Phantom",
    "Warlock",
    "Bogeyman",
    "Headless Horseman",
    "Count Crypt",
    "Baron Von Bat",
    "Lord Skele-pawn",
    "The Bishop of Bones",
];
