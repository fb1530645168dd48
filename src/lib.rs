//! Crate root module declarations for the Phantom Pawn rules engine.
//!
//! Exposes the board model, move legality, termination detection, the
//! per-turn state machine with its power-ups, the opponent move selector and
//! the session controller that ties them to a UI and a player profile.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod match_config;
    pub mod player_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_patterns;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
    pub mod slider_paths;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod termination;
}

pub mod power_ups {
    pub mod power_up_grants;
    pub mod power_up_types;
}

pub mod state_machine {
    pub mod clock;
    pub mod end_turn;
    pub mod move_transitions;
    pub mod power_up_transitions;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
    pub mod opponent_selector;
}

pub mod profile {
    pub mod player_profile;
}

pub mod session {
    pub mod game_session;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod render_game_state;
}
