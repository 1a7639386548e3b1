//! Flat-row export against the fixed column contract.
//!
//! One row per fiche, columns in a fixed order the downstream sheet
//! relies on. Optional fields are resolved through the shared defaults
//! so the exported values can never drift from what the renderer shows.

use atelier_core::fiche::defaults::ResolvedFiche;
use atelier_core::fiche::Fiche;
use atelier_core::logo::View;

/// Ordered column contract of the tabular sink.
pub const COLUMNS: [&str; 13] = [
    "client",
    "phone",
    "collection",
    "reference",
    "size",
    "garment_color",
    "logo_color",
    "logo_front",
    "logo_back",
    "garment_price",
    "customization_price",
    "total",
    "paid",
];

/// One export row, values aligned with [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    values: Vec<String>,
}

impl ExportRow {
    pub fn from_fiche(fiche: &Fiche) -> Self {
        let resolved = ResolvedFiche::new(fiche);
        let flag = |view: View| {
            if fiche.logos.slot(view).is_empty() {
                "no"
            } else {
                "yes"
            }
        };
        let values = vec![
            fiche.client_name.clone(),
            fiche.phone.e164(),
            resolved.collection().to_string(),
            resolved.reference().to_string(),
            fiche.size.to_string(),
            resolved.garment_color().to_string(),
            resolved.logo_color().to_string(),
            flag(View::Front).to_string(),
            flag(View::Back).to_string(),
            format!("{:.2}", fiche.pricing.garment),
            format!("{:.2}", fiche.pricing.customization),
            format!("{:.2}", fiche.pricing.total()),
            if fiche.paid { "yes" } else { "no" }.to_string(),
        ];
        Self { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::fiche::{GarmentSize, Phone, Pricing};
    use atelier_core::logo::LogoPayload;

    #[test]
    fn row_matches_column_contract() {
        let mut fiche = Fiche::new(
            "Jonas Weber",
            Phone::new("+49", "15112345678").unwrap(),
            GarmentSize::M,
        );
        fiche.collection = Some("Summer 25".to_string());
        fiche.reference = Some("TS-204".to_string());
        fiche.pricing = Pricing {
            garment: 12.0,
            customization: 7.5,
        };
        fiche.paid = true;
        fiche
            .logos
            .slot_mut(View::Front)
            .set_payload(LogoPayload::text("CREW"));

        let row = ExportRow::from_fiche(&fiche);
        assert_eq!(row.values().len(), COLUMNS.len());

        assert_eq!(row.values()[0], "Jonas Weber");
        assert_eq!(row.values()[1], "+4915112345678");
        assert_eq!(row.values()[2], "Summer 25");
        assert_eq!(row.values()[3], "TS-204");
        assert_eq!(row.values()[4], "M");
        assert_eq!(row.values()[7], "yes"); // front logo
        assert_eq!(row.values()[8], "no"); // back logo
        assert_eq!(row.values()[9], "12.00");
        assert_eq!(row.values()[10], "7.50");
        assert_eq!(row.values()[11], "19.50");
        assert_eq!(row.values()[12], "yes");
    }

    #[test]
    fn unset_fields_export_resolved_defaults() {
        let fiche = Fiche::new(
            "Lea",
            Phone::new("+33", "611111111").unwrap(),
            GarmentSize::S,
        );
        let row = ExportRow::from_fiche(&fiche);
        assert_eq!(row.values()[2], "-");
        assert_eq!(row.values()[5], atelier_core::constants::DEFAULT_GARMENT_COLOR);
        assert_eq!(row.values()[6], atelier_core::constants::DEFAULT_LOGO_COLOR);
    }
}
