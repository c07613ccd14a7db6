//! Modelo de Inquiry
//!
//! Consultas de contacto enviadas desde el sitio público.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
#[error("Valor no soportado para {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Motivo de la consulta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryInterest {
    Purchase,
    TestDrive,
    TradeIn,
    Financing,
    Service,
    Other,
}

impl InquiryInterest {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryInterest::Purchase => "purchase",
            InquiryInterest::TestDrive => "test-drive",
            InquiryInterest::TradeIn => "trade-in",
            InquiryInterest::Financing => "financing",
            InquiryInterest::Service => "service",
            InquiryInterest::Other => "other",
        }
    }
}

impl FromStr for InquiryInterest {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(InquiryInterest::Purchase),
            "test-drive" => Ok(InquiryInterest::TestDrive),
            "trade-in" => Ok(InquiryInterest::TradeIn),
            "financing" => Ok(InquiryInterest::Financing),
            "service" => Ok(InquiryInterest::Service),
            "other" => Ok(InquiryInterest::Other),
            other => Err(ParseEnumError {
                kind: "interest",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for InquiryInterest {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Estado de atención de la consulta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryStatus {
    #[default]
    New,
    InProgress,
    Responded,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::InProgress => "in-progress",
            InquiryStatus::Responded => "responded",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(InquiryStatus::New),
            "in-progress" => Ok(InquiryStatus::InProgress),
            "responded" => Ok(InquiryStatus::Responded),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for InquiryStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Inquiry {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[sqlx(try_from = "String")]
    pub interest: InquiryInterest,
    pub message: String,
    pub consent: bool,
    #[sqlx(try_from = "String")]
    pub status: InquiryStatus,
    pub vehicle_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos de una consulta antes de ser persistida
#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub interest: InquiryInterest,
    pub message: String,
    pub consent: bool,
    pub vehicle_id: Option<String>,
}

impl Inquiry {
    pub fn from_new(id: Uuid, new: NewInquiry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            interest: new.interest,
            message: new.message,
            consent: new.consent,
            status: InquiryStatus::New,
            vehicle_id: new.vehicle_id,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_wire_names() {
        let json = serde_json::to_string(&InquiryInterest::TestDrive).unwrap();
        assert_eq!(json, "\"test-drive\"");
        assert_eq!("trade-in".parse::<InquiryInterest>().unwrap(), InquiryInterest::TradeIn);
        assert!("lease".parse::<InquiryInterest>().is_err());
    }

    #[test]
    fn test_status_matches_serde_names() {
        for status in [InquiryStatus::New, InquiryStatus::InProgress, InquiryStatus::Responded] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<InquiryStatus>().unwrap(), status);
        }
    }
}
