use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

/// Breeds the backend accepts, compared case-insensitively.
pub const BREEDS: &[&str] = &[
    "Abyssinian",
    "Aegean",
    "American Bobtail",
    "American Curl",
    "American Shorthair",
    "American Wirehair",
    "Arabian Mau",
    "Australian Mist",
    "Balinese",
    "Bambino",
    "Bengal",
    "Birman",
    "Bombay",
    "British Longhair",
    "British Shorthair",
    "Burmese",
    "Maine Coon",
    "Persian",
    "Ragdoll",
    "Siamese",
    "Sphynx",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cat {
    pub id: i64,
    pub name: String,
    pub experience: u32,
    pub breed: String,
    pub salary: Decimal,
}

#[derive(Deserialize)]
pub struct CreateCat {
    pub name: String,
    pub experience: u32,
    pub breed: String,
    pub salary: Decimal,
}

#[derive(Deserialize)]
pub struct UpdateCat {
    pub salary: Decimal,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    cats: BTreeMap<i64, Cat>,
}

pub type Db = Arc<RwLock<Store>>;

/// Failures rendered as `{"detail": ...}` bodies.
#[derive(Debug)]
pub enum Rejection {
    NotFound,
    InvalidBreed(String),
    Invalid(&'static str),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Spy cat not found" }))).into_response()
            }
            Rejection::InvalidBreed(breed) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "detail": {
                        "error": format!("Invalid breed '{breed}'"),
                        "valid_breeds": BREEDS,
                    }
                })),
            )
                .into_response(),
            Rejection::Invalid(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": msg }))).into_response()
            }
        }
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/cats/", get(list_cats).post(create_cat))
        .route("/cats/{id}", get(get_cat).put(update_cat).delete(delete_cat))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Canonical spelling of `breed`, if it is in the vocabulary.
pub fn canonical_breed(breed: &str) -> Option<&'static str> {
    let breed = breed.trim();
    BREEDS.iter().copied().find(|b| b.eq_ignore_ascii_case(breed))
}

fn check_salary(salary: Decimal) -> Result<(), Rejection> {
    if salary < Decimal::ZERO {
        return Err(Rejection::Invalid("Salary must not be negative"));
    }
    Ok(())
}

async fn list_cats(State(db): State<Db>) -> Json<Vec<Cat>> {
    let store = db.read().await;
    Json(store.cats.values().cloned().collect())
}

async fn create_cat(
    State(db): State<Db>,
    Json(input): Json<CreateCat>,
) -> Result<(StatusCode, Json<Cat>), Rejection> {
    if input.name.trim().is_empty() {
        return Err(Rejection::Invalid("Name must not be empty"));
    }
    check_salary(input.salary)?;
    let Some(breed) = canonical_breed(&input.breed) else {
        warn!(breed = %input.breed, "rejected unknown breed");
        return Err(Rejection::InvalidBreed(input.breed));
    };

    let mut store = db.write().await;
    store.next_id += 1;
    let cat = Cat {
        id: store.next_id,
        name: input.name.trim().to_string(),
        experience: input.experience,
        breed: breed.to_string(),
        salary: input.salary,
    };
    store.cats.insert(cat.id, cat.clone());
    info!(id = cat.id, name = %cat.name, "cat created");
    Ok((StatusCode::CREATED, Json(cat)))
}

async fn get_cat(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Cat>, Rejection> {
    let store = db.read().await;
    store.cats.get(&id).cloned().map(Json).ok_or(Rejection::NotFound)
}

async fn update_cat(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateCat>,
) -> Result<Json<Cat>, Rejection> {
    check_salary(input.salary)?;
    let mut store = db.write().await;
    let cat = store.cats.get_mut(&id).ok_or(Rejection::NotFound)?;
    cat.salary = input.salary;
    info!(id, salary = %cat.salary, "salary updated");
    Ok(Json(cat.clone()))
}

async fn delete_cat(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    store.cats.remove(&id).ok_or(Rejection::NotFound)?;
    info!(id, "cat deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn cat_serializes_salary_as_text() {
        let cat = Cat {
            id: 1,
            name: "Tom".to_string(),
            experience: 3,
            breed: "Siamese".to_string(),
            salary: Decimal::from_str("1500.50").unwrap(),
        };
        let json = serde_json::to_value(&cat).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["salary"], "1500.50");
    }

    #[test]
    fn create_cat_accepts_numeric_salary() {
        let input: CreateCat = serde_json::from_str(
            r#"{"name":"Tom","experience":3,"breed":"Siamese","salary":1500.5}"#,
        )
        .unwrap();
        assert_eq!(input.salary, Decimal::from_str("1500.5").unwrap());
    }

    #[test]
    fn create_cat_rejects_negative_experience() {
        let result: Result<CreateCat, _> = serde_json::from_str(
            r#"{"name":"Tom","experience":-2,"breed":"Siamese","salary":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn update_cat_requires_salary() {
        let result: Result<UpdateCat, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn breeds_match_case_insensitively() {
        assert_eq!(canonical_breed("maine coon"), Some("Maine Coon"));
        assert_eq!(canonical_breed(" SIAMESE "), Some("Siamese"));
        assert_eq!(canonical_breed("Tiger"), None);
    }

    #[test]
    fn vocabulary_is_longer_than_the_client_listing() {
        assert!(BREEDS.len() > 10);
    }
}
