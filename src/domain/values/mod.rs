pub mod american_odds;
pub mod sentiment;
