//! Article resource

use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, FromRow, Postgres};

use super::{Resource, UNSET_ID};

/// One item of the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Article {
    /// The unique id of this item; leave empty (or 0) to create a new one
    #[serde(default)]
    pub id: i64,
    /// The name of this item
    pub name: String,
    /// The price of this item
    pub price: f64,
}

impl Article {
    /// An article that has not been stored yet
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: UNSET_ID,
            name: name.into(),
            price,
        }
    }
}

impl Resource for Article {
    const KIND: &'static str = "article";
    const COLLECTION: &'static str = "articles";
    const COLUMNS: &'static [&'static str] = &["name", "price"];
    const SELECT: &'static str = "id, name, price::float8 AS price";
    const CREATE_TABLE: &'static str = "CREATE TABLE IF NOT EXISTS articles (\
        id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY, \
        name VARCHAR NOT NULL, \
        price NUMERIC NOT NULL)";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a non-negative number, got {}", self.price));
        }
        Ok(())
    }

    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
        values.push_bind(self.price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let article = Article {
            id: 1,
            name: "Skittles".to_string(),
            price: 1.99,
        };
        assert_eq!(
            serde_json::to_string(&article).unwrap(),
            r#"{"id":1,"name":"Skittles","price":1.99}"#
        );
    }

    #[test]
    fn test_missing_id_means_new() {
        let article: Article = serde_json::from_str(r#"{"name":"Skittles","price":1.99}"#).unwrap();
        assert!(article.is_new());
        assert_eq!(article.id(), UNSET_ID);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        assert!(serde_json::from_str::<Article>(r#"{"name":"Skittles"}"#).is_err());
        assert!(serde_json::from_str::<Article>(r#"{"price":1.99}"#).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Article::new("Skittles", 1.99).validate().is_ok());
        assert!(Article::new("Free sample", 0.0).validate().is_ok());
        assert!(Article::new("  ", 1.99).validate().is_err());
        assert!(Article::new("Skittles", -1.0).validate().is_err());
    }
}
