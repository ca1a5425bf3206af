pub mod docs;
pub mod gateway;
pub mod health;
