pub mod frequency;
pub mod health;
pub mod notification;
pub mod plant;
