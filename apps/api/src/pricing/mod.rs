pub mod cost;
pub mod handlers;
pub mod ranker;
pub mod rates;
pub mod search;
pub mod spec;
pub mod validation;
