//! Client core for the spy cats service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the stateless
//! `SpyCatClient` sits `Roster`, the page container that owns the list of
//! cats, the create form and the inline salary editor, and refetches the
//! list after every mutation.
//!
//! # Design
//! - `SpyCatClient` is stateless; it holds only `base_url`.
//! - `Roster` is a state machine: actions return the request to send and
//!   `on_response` consumes the outcome. `Roster::run` drives a chain
//!   through any `Transport`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod roster;
pub mod salary;
pub mod types;

pub use client::SpyCatClient;
pub use error::ApiError;
pub use form::{CatForm, Field, SalaryEdit};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use roster::{ListView, Roster, RosterError, RowActions, RowView, SalaryCell};
pub use salary::{format_salary, parse_salary};
pub use types::{Cat, CatCreate, CatId, CatUpdate, ErrorBody, ErrorDetail};
