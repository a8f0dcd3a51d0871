use serde::Deserialize;
use serde::Serialize;

/// A long-term holding in the user's demat account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub name: String,
    pub qty: i32,
    pub avg: f64,
    pub price: f64,
    /// Net change, display formatted (e.g. `"+0.58%"`)
    pub net: String,
    /// Day change, display formatted
    pub day: String,
}

/// An open intraday or delivery position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub product: String,
    pub name: String,
    pub qty: i32,
    pub avg: f64,
    pub price: f64,
    pub net: String,
    pub day: String,
    pub is_loss: bool,
}
