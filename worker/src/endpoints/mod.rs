pub mod health;
pub mod post;
