//! Domain DTOs for the spy cats API.
//!
//! # Design
//! These mirror the backend schema but are defined independently of the
//! mock-server crate; the integration tests catch schema drift. Salary is a
//! `Decimal` everywhere. Responses carry it as decimal text, requests send it
//! as a JSON number because that is what the backend accepts.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatId(pub i64);

impl fmt::Display for CatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A spy cat as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cat {
    pub id: CatId,
    pub name: String,
    pub experience: u32,
    pub breed: String,
    pub salary: Decimal,
}

/// Request payload for creating a cat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatCreate {
    pub name: String,
    pub experience: u32,
    pub breed: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
}

/// Request payload for updating a cat. Salary is the only mutable field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatUpdate {
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
}

/// Error envelope the backend returns with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Structured {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        valid_breeds: Option<Vec<String>>,
    },
    /// Any other shape, e.g. a list of field validation errors.
    Other(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn cat_reads_salary_as_decimal_text() {
        let cat: Cat = serde_json::from_str(
            r#"{"id":7,"name":"Tom","experience":3,"breed":"Siamese","salary":"1500.50"}"#,
        )
        .unwrap();
        assert_eq!(cat.id, CatId(7));
        assert_eq!(cat.salary, Decimal::from_str("1500.50").unwrap());

        let back = serde_json::to_value(&cat).unwrap();
        assert_eq!(back["salary"], "1500.50");
    }

    #[test]
    fn create_payload_sends_salary_as_number() {
        let input = CatCreate {
            name: "Tom".to_string(),
            experience: 3,
            breed: "Siamese".to_string(),
            salary: Decimal::from_str("1500.5").unwrap(),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["salary"], 1500.5);
        assert_eq!(json["experience"], 3);
    }

    #[test]
    fn negative_experience_is_rejected() {
        let result: Result<Cat, _> = serde_json::from_str(
            r#"{"id":1,"name":"Tom","experience":-1,"breed":"Siamese","salary":"1"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn error_detail_accepts_every_backend_shape() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Spy cat not found"}"#).unwrap();
        assert!(matches!(body.detail, Some(ErrorDetail::Message(ref m)) if m == "Spy cat not found"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":{"error":"Invalid breed","valid_breeds":["Abyssinian"]}}"#)
                .unwrap();
        match body.detail {
            Some(ErrorDetail::Structured { error, valid_breeds }) => {
                assert_eq!(error.as_deref(), Some("Invalid breed"));
                assert_eq!(valid_breeds.unwrap(), vec!["Abyssinian".to_string()]);
            }
            other => panic!("unexpected detail: {other:?}"),
        }

        let body: ErrorBody = serde_json::from_str(r#"{"detail":[{"msg":"field required"}]}"#).unwrap();
        assert!(matches!(body.detail, Some(ErrorDetail::Other(_))));

        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.detail.is_none());
    }
}
