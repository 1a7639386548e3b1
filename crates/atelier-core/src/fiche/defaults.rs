//! Centralized default resolution for optional fiche fields.
//!
//! Every consumer (mockup renderer, editor seeding, export rows,
//! notification text) reads resolved values through [`ResolvedFiche`] so
//! the defaults cannot drift between the rendering and persistence paths.

use crate::constants;
use crate::fiche::Fiche;

/// Read-only view of a fiche with every optional field resolved.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedFiche<'a> {
    fiche: &'a Fiche,
}

impl<'a> ResolvedFiche<'a> {
    pub fn new(fiche: &'a Fiche) -> Self {
        Self { fiche }
    }

    pub fn fiche(&self) -> &'a Fiche {
        self.fiche
    }

    /// Garment color, falling back to the workshop default.
    pub fn garment_color(&self) -> &'a str {
        self.fiche
            .garment_color
            .as_deref()
            .unwrap_or(constants::DEFAULT_GARMENT_COLOR)
    }

    /// Logo color, falling back to the workshop default.
    pub fn logo_color(&self) -> &'a str {
        self.fiche
            .logo_color
            .as_deref()
            .unwrap_or(constants::DEFAULT_LOGO_COLOR)
    }

    pub fn collection(&self) -> &'a str {
        self.fiche.collection.as_deref().unwrap_or("-")
    }

    pub fn reference(&self) -> &'a str {
        self.fiche.reference.as_deref().unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiche::{GarmentSize, Phone};

    #[test]
    fn unset_colors_resolve_to_workshop_defaults() {
        let fiche = Fiche::new(
            "Nadia",
            Phone::new("+33", "611111111").unwrap(),
            GarmentSize::S,
        );
        let resolved = ResolvedFiche::new(&fiche);
        assert_eq!(resolved.garment_color(), constants::DEFAULT_GARMENT_COLOR);
        assert_eq!(resolved.logo_color(), constants::DEFAULT_LOGO_COLOR);
        assert_eq!(resolved.collection(), "-");
    }

    #[test]
    fn set_colors_pass_through() {
        let mut fiche = Fiche::new(
            "Nadia",
            Phone::new("+33", "611111111").unwrap(),
            GarmentSize::S,
        );
        fiche.garment_color = Some("#102030".into());
        let resolved = ResolvedFiche::new(&fiche);
        assert_eq!(resolved.garment_color(), "#102030");
    }
}
