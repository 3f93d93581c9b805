//! Page-level state objects driven by host UI events.
//!
//! # Responsibility
//! - Expose explicit transition methods in place of implicit re-renders.
//! - Keep hosts decoupled from storage, timers and viewport details.

pub mod articles;
pub mod contact;
pub mod issue_card;
pub mod notification_center;
pub mod overlay;
pub mod portal;
pub mod quiz_engine;
