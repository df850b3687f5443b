pub mod pink;
pub mod white;

pub use pink::{filter, filter_channel, filter_in_place, KelletState};
pub use white::{render_white, WhiteNoise};
