//! A bounded queue of upcoming game pieces.
//!
//! [`queue::Queue`] is a fixed-capacity ring buffer, [`piece::PieceGenerator`]
//! hands out pieces of random kind with dense, increasing ids.

pub mod piece;
pub mod queue;
