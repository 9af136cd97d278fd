//! Input state for the create form and the inline salary editor.

use rust_decimal::Decimal;

use crate::salary::parse_salary;
use crate::types::{Cat, CatCreate, CatId, CatUpdate};

/// A field of the create form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Experience,
    Breed,
    Salary,
}

/// Create-form state. Values survive a failed submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatForm {
    pub name: String,
    pub experience: u32,
    pub breed: String,
    pub salary: Decimal,
    pub(crate) error: Option<String>,
    pub(crate) submitting: bool,
    /// Numeric experience text that is not a whole, non-negative count.
    rejected_experience: Option<String>,
}

impl CatForm {
    /// Set a field from raw input. Non-numeric text becomes zero; numbers
    /// that are not valid experience are kept back for `validate`.
    pub fn set(&mut self, field: Field, raw: &str) {
        match field {
            Field::Name => self.name = raw.to_string(),
            Field::Breed => self.breed = raw.to_string(),
            Field::Experience => self.set_experience(raw),
            Field::Salary => self.salary = parse_salary(raw),
        }
    }

    fn set_experience(&mut self, raw: &str) {
        let raw = raw.trim();
        self.rejected_experience = None;
        self.experience = match parse_years(raw) {
            Ok(years) => years,
            Err(true) => {
                self.rejected_experience = Some(raw.to_string());
                0
            }
            Err(false) => 0,
        };
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Check the constraints a submit requires before anything is sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.rejected_experience.is_some() {
            return Err("Experience must be a whole number of years, 0 or more".to_string());
        }
        if self.breed.trim().is_empty() {
            return Err("Breed is required".to_string());
        }
        if self.salary < Decimal::ZERO {
            return Err("Salary must not be negative".to_string());
        }
        Ok(())
    }

    pub fn to_create(&self) -> CatCreate {
        CatCreate {
            name: self.name.trim().to_string(),
            experience: self.experience,
            breed: self.breed.trim().to_string(),
            salary: self.salary,
        }
    }
}

/// Parse whole years. The error says whether the text was numeric at all.
fn parse_years(raw: &str) -> Result<u32, bool> {
    if let Ok(years) = raw.parse::<u32>() {
        return Ok(years);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
                Ok(value as u32)
            } else {
                Err(true)
            }
        }
        _ => Err(false),
    }
}

/// Inline salary editor for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryEdit {
    id: CatId,
    pub salary: Decimal,
    pub(crate) error: Option<String>,
    pub(crate) saving: bool,
}

impl SalaryEdit {
    pub fn for_cat(cat: &Cat) -> Self {
        Self {
            id: cat.id,
            salary: cat.salary,
            error: None,
            saving: false,
        }
    }

    pub fn id(&self) -> CatId {
        self.id
    }

    pub fn set_salary(&mut self, raw: &str) {
        self.salary = parse_salary(raw);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.salary < Decimal::ZERO {
            return Err("Salary must not be negative".to_string());
        }
        Ok(())
    }

    pub fn to_update(&self) -> CatUpdate {
        CatUpdate { salary: self.salary }
    }
}
