use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default, deserialize_with = "json_number::deserialize")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dealer {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Outstanding advance.
    #[serde(default, deserialize_with = "json_number::deserialize")]
    pub balance: Decimal,
}

/// One challan as returned by the ledger API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "string_or_number")]
    pub challan: String,
    pub wood_type: WoodType,
    #[serde(default, deserialize_with = "json_number::deserialize")]
    pub kg: Decimal,
    #[serde(default, deserialize_with = "json_number::deserialize")]
    pub buy_rate: Decimal,
    #[serde(default, deserialize_with = "json_number::deserialize")]
    pub sell_rate: Decimal,
    #[serde(default, deserialize_with = "json_number::deserialize")]
    pub total_amount: Decimal,
    #[serde(deserialize_with = "lenient_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub narration: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WoodType {
    Chamble,
    Meheguni,
    Rendi,
    #[serde(other)]
    Others,
}

impl WoodType {
    pub const ALL: [WoodType; 4] = [
        WoodType::Chamble,
        WoodType::Meheguni,
        WoodType::Rendi,
        WoodType::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WoodType::Chamble => "Chamble",
            WoodType::Meheguni => "Meheguni",
            WoodType::Rendi => "Rendi",
            WoodType::Others => "Others",
        }
    }
}

impl fmt::Display for WoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WoodType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WoodType::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownWoodType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(serialize_with = "json_number::serialize")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDealer {
    pub name: String,
    pub phone: String,
    #[serde(serialize_with = "json_number::serialize")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub challan: String,
    pub wood_type: WoodType,
    #[serde(serialize_with = "json_number::serialize")]
    pub kg: Decimal,
    #[serde(serialize_with = "json_number::serialize")]
    pub buy_rate: Decimal,
    #[serde(serialize_with = "json_number::serialize")]
    pub sell_rate: Decimal,
    #[serde(serialize_with = "json_number::serialize")]
    pub total_amount: Decimal,
    pub date: NaiveDate,
    pub narration: String,
}

impl NewTransaction {
    pub fn new(
        challan: String,
        wood_type: WoodType,
        kg: Decimal,
        buy_rate: Decimal,
        sell_rate: Decimal,
        date: NaiveDate,
        narration: String,
    ) -> Result<Self, Error> {
        Ok(Self {
            challan,
            wood_type,
            kg,
            buy_rate,
            sell_rate,
            total_amount: challan_total(kg, sell_rate)?,
            date,
            narration,
        })
    }
}

/// Invoice total for a challan. The buy rate is not part of it.
pub fn challan_total(kg: Decimal, sell_rate: Decimal) -> Result<Decimal, Error> {
    kg.checked_mul(sell_rate)
        .ok_or_else(|| Error::AmountOutOfRange(format!("{kg} kg × {sell_rate}")))
}

/// Decimals travel as plain JSON numbers; integral values are written without
/// a fractional part so `1500` stays `1500`.
pub mod json_number {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(val: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        if val.fract().is_zero() {
            if let Some(i) = val.to_i64() {
                return s.serialize_i64(i);
            }
        }
        match val.to_f64() {
            Some(f) => s.serialize_f64(f),
            None => s.serialize_str(&val.to_string()),
        }
    }

    /// Accepts numbers, numeric strings and null (as zero).
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        Ok(Option::<Decimal>::deserialize(d)?.unwrap_or_default())
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }
    Ok(match Raw::deserialize(d)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Accepts "2025-01-03" as well as full timestamps such as "2025-01-03T00:00:00Z".
fn lenient_date<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(d)?;
    let head = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_account_serializes_integral_balance_as_integer() {
        let body = NewAccount {
            name: "Cash".to_string(),
            balance: dec("1500"),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"name":"Cash","balance":1500}"#
        );
    }

    #[test]
    fn test_fractional_amount_serializes_as_float() {
        let body = NewDealer {
            name: "Karim".to_string(),
            phone: String::new(),
            balance: dec("12.5"),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["balance"], serde_json::json!(12.5));
        assert_eq!(value["phone"], "");
    }

    #[test]
    fn test_total_ignores_buy_rate() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let a = NewTransaction::new(
            "C-1".into(),
            WoodType::Rendi,
            dec("10"),
            dec("200"),
            dec("250"),
            date,
            String::new(),
        )
        .unwrap();
        let b = NewTransaction::new(
            "C-1".into(),
            WoodType::Rendi,
            dec("10"),
            dec("999"),
            dec("250"),
            date,
            String::new(),
        )
        .unwrap();
        assert_eq!(a.total_amount, dec("2500"));
        assert_eq!(a.total_amount, b.total_amount);
    }

    #[test]
    fn test_new_transaction_payload_shape() {
        let tx = NewTransaction::new(
            "42".into(),
            WoodType::Meheguni,
            dec("1.5"),
            dec("100"),
            dec("120"),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            "truck 7".into(),
        )
        .unwrap();
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "challan": "42",
                "wood_type": "Meheguni",
                "kg": 1.5,
                "buy_rate": 100,
                "sell_rate": 120,
                "total_amount": 180,
                "date": "2025-03-01",
                "narration": "truck 7"
            })
        );
    }

    #[test]
    fn test_transaction_decodes_lenient_fields() {
        let json = r#"{
            "date": "2025-01-03T00:00:00.000Z",
            "challan": 1017,
            "wood_type": "Teak",
            "kg": "12.5",
            "sell_rate": 250,
            "buy_rate": null,
            "total_amount": 3125
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.challan, "1017");
        assert_eq!(tx.wood_type, WoodType::Others);
        assert_eq!(tx.kg, dec("12.5"));
        assert_eq!(tx.buy_rate, Decimal::ZERO);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(tx.narration, "");
    }

    #[test]
    fn test_null_narration_is_empty() {
        let json = r#"{"date":"2025-01-03","challan":"C-1","wood_type":"Rendi","narration":null}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.narration, "");
    }

    #[test]
    fn test_total_out_of_range_is_an_error() {
        let huge = dec("99999999999999999999");
        let err = challan_total(huge, huge).unwrap_err();
        assert!(matches!(err, Error::AmountOutOfRange(_)));
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(
            NewTransaction::new("C-1".into(), WoodType::Rendi, huge, dec("1"), huge, date, String::new())
                .is_err()
        );
    }

    #[test]
    fn test_dealer_without_phone() {
        let d: Dealer = serde_json::from_str(r#"{"name":"Rahim","balance":5000}"#).unwrap();
        assert_eq!(d.phone, None);
        assert_eq!(d.balance, dec("5000"));
    }

    #[test]
    fn test_wood_type_parse() {
        assert_eq!("chamble".parse::<WoodType>().unwrap(), WoodType::Chamble);
        assert_eq!(" Rendi ".parse::<WoodType>().unwrap(), WoodType::Rendi);
        assert!("oak".parse::<WoodType>().is_err());
    }
}
