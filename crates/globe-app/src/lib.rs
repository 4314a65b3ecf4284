//! Headless globe viewer: configuration, logging and a fixed-step loop
//! driving the surface generator and the view choreographer.

pub mod game_loop;
pub mod platform;
pub mod session;
