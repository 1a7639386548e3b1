//! Client notification builder.
//!
//! Once every production step is set, the workshop can send the client a
//! prefilled pickup message. The builder only constructs the message and
//! the messaging deep link; delivery goes through the injected
//! `NotificationChannel` and is fire-and-forget.

use atelier_core::error::StepError;
use atelier_core::fiche::defaults::ResolvedFiche;
use atelier_core::fiche::Fiche;

/// A prefilled outbound message for one fiche.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientNotification {
    pub phone_e164: String,
    pub message: String,
}

impl ClientNotification {
    /// Builds the notification for a fiche whose workflow is complete.
    ///
    /// `template` may reference `{client}` and `{reference}`.
    pub fn for_fiche(fiche: &Fiche, template: &str) -> Result<Self, StepError> {
        if !fiche.steps.is_complete() {
            return Err(StepError::NotComplete);
        }
        let resolved = ResolvedFiche::new(fiche);
        let message = template
            .replace("{client}", &fiche.client_name)
            .replace("{reference}", resolved.reference());
        Ok(Self {
            phone_e164: fiche.phone.e164(),
            message,
        })
    }

    /// Messaging deep link (`https://wa.me/<number>?text=...`).
    pub fn deep_link(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.phone_e164.trim_start_matches('+'),
            percent_encode(&self.message)
        )
    }
}

/// Minimal percent-encoding for the query component of the deep link.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::fiche::{GarmentSize, Phone};

    fn completed_fiche() -> Fiche {
        let mut fiche = Fiche::new(
            "Ana Silva",
            Phone::new("+351", "912000111").unwrap(),
            GarmentSize::L,
        );
        fiche.reference = Some("TS-204".to_string());
        fiche.validate();
        fiche.steps.preparation = true;
        fiche.steps.production = true;
        fiche.steps.completed = true;
        fiche
    }

    #[test]
    fn message_is_prefilled_from_template() {
        let fiche = completed_fiche();
        let n = ClientNotification::for_fiche(
            &fiche,
            "Hello {client}, your order {reference} is ready for pickup!",
        )
        .unwrap();
        assert_eq!(n.phone_e164, "+351912000111");
        assert_eq!(
            n.message,
            "Hello Ana Silva, your order TS-204 is ready for pickup!"
        );
    }

    #[test]
    fn refused_before_completion() {
        let mut fiche = completed_fiche();
        fiche.steps.completed = false;
        let err = ClientNotification::for_fiche(&fiche, "{client}").unwrap_err();
        assert_eq!(err, StepError::NotComplete);
    }

    #[test]
    fn deep_link_is_encoded() {
        let fiche = completed_fiche();
        let n = ClientNotification::for_fiche(&fiche, "Ready & waiting!").unwrap();
        let link = n.deep_link();
        assert!(link.starts_with("https://wa.me/351912000111?text="));
        assert!(link.contains("Ready%20%26%20waiting%21"));
        assert!(!link.contains(' '));
    }
}
