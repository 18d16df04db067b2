/// Tokens granted to a new (or reset) player
pub const STARTING_STAKE: u64 = 100;

/// Price of one risk event
pub const RISK_COST: u64 = 1_000;

/// Credited when the player survives a risk event
pub const RISK_PAYOUT: u64 = 2_500;

/// Balance that triggers the one-time win signal
pub const WIN_TARGET: u64 = 1_000_000;

/// Faces on the risk event die
pub const DIE_FACES: u8 = 6;

/// The die face that ends the game (1 in 6)
pub const LETHAL_ROLL: u8 = 1;

/// Maximum number of history entries retained
pub const HISTORY_CAP: usize = 100;

/// Number of reels on the slot machine
pub const REELS: usize = 3;

/// Slot multipliers, applied to the wager
pub const JACKPOT_MULTIPLIER: u64 = 50;
pub const TRIPLE_MULTIPLIER: u64 = 10;
pub const PAIR_MULTIPLIER: u64 = 2;

/// Error codes for rejection updates
pub const ERROR_INVALID_BET: u8 = 1;
pub const ERROR_INSUFFICIENT_BALANCE: u8 = 2;
pub const ERROR_GAME_OVER: u8 = 3;
pub const ERROR_SPIN_IN_PROGRESS: u8 = 4;
pub const ERROR_NO_WIN_PENDING: u8 = 5;
pub const ERROR_INVALID_SPIN_COUNT: u8 = 6;
pub const ERROR_AUTOPLAY_ACTIVE: u8 = 7;
