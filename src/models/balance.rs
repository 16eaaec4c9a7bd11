use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account balance exactly as upstream reports it (`available`, `pending`,
/// `currency`, `last_updated`, ...). Nothing here is interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BalanceSnapshot(pub Map<String, Value>);

impl BalanceSnapshot {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_any_field_types() {
        let raw = json!({
            "available": "150000",
            "pending": 0,
            "currency": "IDR",
            "last_updated": 1736935200
        });
        let balance: BalanceSnapshot = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(balance.get("available"), Some(&json!("150000")));
        assert_eq!(serde_json::to_value(&balance).unwrap(), raw);
    }
}
