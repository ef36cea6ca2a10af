use serde::{Deserialize, Deserializer, Serialize};

/// Columns requested from the trade store, in wire order.
pub const TRADE_COLUMNS: &[&str] = &["id", "user_id", "trade_type", "pnl", "notes", "entry_date"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trade_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pnl: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default)]
    pub entry_date: Option<String>,
}

impl TradeRecord {
    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }

    /// Trimmed strategy label, `None` when blank.
    pub fn strategy(&self) -> Option<&str> {
        let label = self.trade_type.trim();
        if label.is_empty() {
            None
        } else {
            Some(label)
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Int(n)) => n.to_string(),
        Some(RawId::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_store_row_with_nulls() {
        let raw = r#"{
            "id": 42,
            "user_id": "u-1",
            "trade_type": null,
            "pnl": null,
            "notes": null,
            "entry_date": "2024-01-15T12:00:00+00:00"
        }"#;
        let rec: TradeRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.id, "42");
        assert_eq!(rec.trade_type, "");
        assert_eq!(rec.pnl, 0.0);
        assert_eq!(rec.notes, "");
        assert!(!rec.is_win());
        assert_eq!(rec.strategy(), None);
    }

    #[test]
    fn decodes_row_with_missing_fields() {
        let rec: TradeRecord = serde_json::from_str(r#"{"pnl": 12.5}"#).unwrap();
        assert_eq!(rec.id, "");
        assert!(rec.is_win());
        assert!(rec.entry_date.is_none());
    }

    #[test]
    fn uuid_id_kept_as_string() {
        let rec: TradeRecord = serde_json::from_str(
            r#"{"id": "9b2f0c1e-0000-4000-8000-000000000001", "trade_type": "  Breakout "}"#,
        )
        .unwrap();
        assert_eq!(rec.id, "9b2f0c1e-0000-4000-8000-000000000001");
        assert_eq!(rec.strategy(), Some("Breakout"));
    }
}
