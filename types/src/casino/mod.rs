mod codec;
mod constants;
mod game;
mod history;
mod player;
mod reject;

pub use codec::{decode_balance, decode_history, encode_balance, encode_history, CodecError};
pub use constants::*;
pub use game::*;
pub use history::*;
pub use player::*;
pub use reject::*;
