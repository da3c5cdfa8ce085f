use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRequestDto {
    pub id: u32,
    pub source: u32,
    pub destination: u32,
    /// CPU demand per stage, in chain order.
    pub stages: Vec<i64>,
    pub bandwidth: i64,
    pub max_delay: i64,
}
