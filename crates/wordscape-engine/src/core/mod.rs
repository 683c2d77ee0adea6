pub mod lane;
pub mod rng;
pub mod session;
pub mod time;
pub mod word;
