//! Order resource

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, Postgres};

use super::{Resource, UNSET_ID};

/// One placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    /// The unique id of this order; leave empty (or 0) to create a new one
    #[serde(default)]
    pub id: i64,
    /// Date and time of this order
    #[serde(default, alias = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
}

impl Order {
    /// An order that has not been stored yet
    pub fn new(date_time: Option<DateTime<Utc>>) -> Self {
        Self {
            id: UNSET_ID,
            date_time,
        }
    }
}

impl Resource for Order {
    const KIND: &'static str = "order";
    const COLLECTION: &'static str = "orders";
    const COLUMNS: &'static [&'static str] = &["date_time"];
    const SELECT: &'static str = "id, date_time";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS orders (\
        id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY, \
        date_time TIMESTAMPTZ)";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.date_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_time_is_optional() {
        let order: Order = serde_json::from_str("{}").unwrap();
        assert!(order.is_new());
        assert!(order.date_time.is_none());
        assert_eq!(serde_json::to_string(&order).unwrap(), r#"{"id":0}"#);
    }

    #[test]
    fn test_legacy_field_name_accepted() {
        let order: Order =
            serde_json::from_str(r#"{"id":3,"lastUpdated":"2021-03-01T12:00:00Z"}"#).unwrap();
        assert_eq!(order.id, 3);
        assert_eq!(
            order.date_time,
            Some(Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_json_shape() {
        let order = Order {
            id: 7,
            date_time: Some(Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap()),
        };
        assert_eq!(
            serde_json::to_string(&order).unwrap(),
            r#"{"id":7,"date_time":"2021-03-01T12:00:00Z"}"#
        );
    }
}
