//! Fiche: the order record for one customized garment.
//!
//! Identity, client and garment attributes, per-view logo slots, pricing,
//! flags and the production step record. Once a fiche is validated every
//! ordinary field is frozen; only the production steps and the urgency
//! flag stay mutable until the fiche is unvalidated again.

pub mod defaults;
pub mod steps;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::FicheError;
use crate::logo::LogoSlots;
use steps::ProductionSteps;

/// Garment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GarmentSize {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

impl GarmentSize {
    pub fn as_str(self) -> &'static str {
        match self {
            GarmentSize::Xs => "XS",
            GarmentSize::S => "S",
            GarmentSize::M => "M",
            GarmentSize::L => "L",
            GarmentSize::Xl => "XL",
            GarmentSize::Xxl => "XXL",
        }
    }
}

impl fmt::Display for GarmentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client phone number with its country dial code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    /// Dial code including the leading '+' ("+33", "+351", ...).
    pub country_code: String,
    /// National number, digits only.
    pub number: String,
}

impl Phone {
    /// Builds a phone number, rejecting malformed input locally.
    pub fn new(country_code: &str, number: &str) -> Result<Self, FicheError> {
        let code = country_code.trim();
        if !code.starts_with('+') || !code[1..].chars().all(|c| c.is_ascii_digit()) || code.len() < 2
        {
            return Err(FicheError::InvalidPhone {
                reason: format!("country code '{code}' must be '+' followed by digits"),
            });
        }
        let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(FicheError::InvalidPhone {
                reason: "number must contain digits only".to_string(),
            });
        }
        Ok(Self {
            country_code: code.to_string(),
            number: digits,
        })
    }

    /// E.164-style rendering without separators, e.g. "+33612345678".
    pub fn e164(&self) -> String {
        format!("{}{}", self.country_code, self.number)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.country_code, self.number)
    }
}

/// The two price components of a fiche, non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pricing {
    pub garment: f64,
    pub customization: f64,
}

impl Pricing {
    pub fn total(&self) -> f64 {
        self.garment + self.customization
    }
}

/// Parses a user-entered price. Accepts a comma as decimal separator;
/// rejects anything non-numeric or negative without mutating state.
pub fn parse_price(input: &str) -> Result<f64, FicheError> {
    let normalized = input.trim().replace(',', ".");
    let value: f64 = normalized.parse().map_err(|_| FicheError::InvalidPrice {
        input: input.to_string(),
        reason: "not a number".to_string(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(FicheError::InvalidPrice {
            input: input.to_string(),
            reason: "must be a non-negative amount".to_string(),
        });
    }
    Ok(value)
}

/// Validates a "#RRGGBB" hex color.
pub fn parse_hex_color(value: &str) -> Result<String, FicheError> {
    let v = value.trim();
    let ok = v.len() == 7
        && v.starts_with('#')
        && v[1..].chars().all(|c| c.is_ascii_hexdigit());
    if ok {
        Ok(v.to_uppercase())
    } else {
        Err(FicheError::InvalidColor {
            value: value.to_string(),
        })
    }
}

/// The order record for one customized garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fiche {
    pub id: Uuid,
    pub client_name: String,
    pub phone: Phone,
    /// Catalog collection the garment belongs to (export contract).
    #[serde(default)]
    pub collection: Option<String>,
    /// Catalog reference of the garment model (export contract).
    #[serde(default)]
    pub reference: Option<String>,
    pub size: GarmentSize,
    /// Hex garment color; `None` resolves to the workshop default.
    #[serde(default)]
    pub garment_color: Option<String>,
    /// Hex logo color; `None` resolves to the workshop default.
    #[serde(default)]
    pub logo_color: Option<String>,
    #[serde(default)]
    pub logos: LogoSlots,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub validated: bool,
    #[serde(default)]
    pub steps: ProductionSteps,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial edit of the ordinary (lockable) fields.
#[derive(Debug, Clone, Default)]
pub struct FicheEdit {
    pub client_name: Option<String>,
    pub phone: Option<Phone>,
    pub collection: Option<Option<String>>,
    pub reference: Option<Option<String>>,
    pub size: Option<GarmentSize>,
    pub garment_color: Option<Option<String>>,
    pub logo_color: Option<Option<String>>,
    pub pricing: Option<Pricing>,
    pub paid: Option<bool>,
}

impl Fiche {
    /// Creates a fresh, unvalidated fiche.
    pub fn new(client_name: impl Into<String>, phone: Phone, size: GarmentSize) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            phone,
            collection: None,
            reference: None,
            size,
            garment_color: None,
            logo_color: None,
            logos: LogoSlots::new(),
            pricing: Pricing::default(),
            paid: false,
            urgent: false,
            validated: false,
            steps: ProductionSteps::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refuses ordinary edits on a validated fiche.
    pub fn ensure_editable(&self) -> Result<(), FicheError> {
        if self.validated {
            Err(FicheError::Locked { id: self.id })
        } else {
            Ok(())
        }
    }

    /// Applies a partial edit to the ordinary fields, refused entirely
    /// when the fiche is validated. Color values are validated before any
    /// field is written.
    pub fn apply(&mut self, edit: FicheEdit) -> Result<(), FicheError> {
        self.ensure_editable()?;

        // Validate colors before any field is written.
        let garment_color = match edit.garment_color {
            Some(Some(c)) => Some(Some(parse_hex_color(&c)?)),
            Some(None) => Some(None),
            None => None,
        };
        let logo_color = match edit.logo_color {
            Some(Some(c)) => Some(Some(parse_hex_color(&c)?)),
            Some(None) => Some(None),
            None => None,
        };

        if let Some(name) = edit.client_name {
            self.client_name = name;
        }
        if let Some(phone) = edit.phone {
            self.phone = phone;
        }
        if let Some(collection) = edit.collection {
            self.collection = collection;
        }
        if let Some(reference) = edit.reference {
            self.reference = reference;
        }
        if let Some(size) = edit.size {
            self.size = size;
        }
        if let Some(color) = garment_color {
            self.garment_color = color;
        }
        if let Some(color) = logo_color {
            self.logo_color = color;
        }
        if let Some(pricing) = edit.pricing {
            self.pricing = pricing;
        }
        if let Some(paid) = edit.paid {
            self.paid = paid;
        }
        self.touch();
        Ok(())
    }

    /// Locks the record and marks the `validated` production step.
    pub fn validate(&mut self) {
        tracing::debug!(id = %self.id, "fiche validated");
        self.validated = true;
        self.steps.validated = true;
        self.touch();
    }

    /// Returns the fiche to the editable state. The `validated` step flag
    /// is withdrawn with it; later step flags are left untouched.
    pub fn unvalidate(&mut self) {
        tracing::debug!(id = %self.id, "fiche unvalidated");
        self.validated = false;
        self.steps.validated = false;
        self.touch();
    }

    /// Urgency stays mutable after validation.
    pub fn set_urgent(&mut self, urgent: bool) {
        self.urgent = urgent;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fiche() -> Fiche {
        Fiche::new(
            "Marta Oliveira",
            Phone::new("+351", "912 345 678").unwrap(),
            GarmentSize::M,
        )
    }

    #[test]
    fn phone_rejects_garbage_and_keeps_digits() {
        assert!(Phone::new("33", "612345678").is_err());
        assert!(Phone::new("+33", "61a345678").is_err());
        let p = Phone::new("+33", "6 12 34 56 78").unwrap();
        assert_eq!(p.e164(), "+33612345678");
    }

    #[test]
    fn price_parsing_accepts_comma_rejects_negative() {
        assert_eq!(parse_price("12,50").unwrap(), 12.5);
        assert_eq!(parse_price(" 8 ").unwrap(), 8.0);
        assert!(parse_price("-3").is_err());
        assert!(parse_price("douze").is_err());
    }

    #[test]
    fn hex_color_is_normalized() {
        assert_eq!(parse_hex_color("#ff8800").unwrap(), "#FF8800");
        assert!(parse_hex_color("#ff880").is_err());
        assert!(parse_hex_color("red").is_err());
    }

    #[test]
    fn validated_fiche_refuses_ordinary_edits() {
        let mut f = fiche();
        f.validate();

        let err = f
            .apply(FicheEdit {
                client_name: Some("Other".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, FicheError::Locked { id: f.id });
        assert_eq!(f.client_name, "Marta Oliveira");

        // Steps and urgency stay mutable.
        f.set_urgent(true);
        assert!(f.urgent);
        f.steps.preparation = true;
    }

    #[test]
    fn unvalidate_is_the_only_way_back() {
        let mut f = fiche();
        f.validate();
        assert!(f.steps.validated);

        f.unvalidate();
        assert!(!f.steps.validated);
        f.apply(FicheEdit {
            paid: Some(true),
            ..Default::default()
        })
        .unwrap();
        assert!(f.paid);
    }

    #[test]
    fn invalid_color_edit_mutates_nothing() {
        let mut f = fiche();
        let before = f.clone();
        let res = f.apply(FicheEdit {
            client_name: Some("Changed".into()),
            garment_color: Some(Some("#zzz".into())),
            ..Default::default()
        });
        assert!(res.is_err());
        assert_eq!(f.client_name, before.client_name);
        assert_eq!(f.garment_color, before.garment_color);
    }

    #[test]
    fn serde_roundtrip() {
        let mut f = fiche();
        f.garment_color = Some("#1A2B3C".into());
        f.logos
            .slot_mut(crate::logo::View::Front)
            .set_payload(crate::logo::LogoPayload::text("CREW"));
        let json = serde_json::to_string(&f).unwrap();
        let back: Fiche = serde_json::from_str(&json).unwrap();
        assert_eq!(f, back);
    }
}
