//! Fiche lifecycle service.
//!
//! Wires the pure crates (editor, mockup, production) to the injected
//! collaborators. Every outbound call is fire-once and asynchronous; the
//! primary document store is best-effort with the in-memory fallback
//! keeping the session functional, blob and sink failures degrade to
//! soft warnings, and rasterization runs under a bounded timeout inside
//! a scoped capture stage.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use atelier_core::collaborators::{
    BlobStore, DocumentStore, NotificationChannel, Rasterizer, TabularSink,
};
use atelier_core::constants;
use atelier_core::error::{Error, ExportError, Result, StoreError};
use atelier_core::fiche::steps::Step;
use atelier_core::fiche::{Fiche, FicheEdit, GarmentSize, Phone};
use atelier_core::geometry::Size;
use atelier_core::logo::{LogoPayload, View};
use atelier_editor::{EditorConfig, LogoEditor, ViewZone};
use atelier_mockup::{MockupRenderer, ViewZones};
use atelier_production::{ClientNotification, RevertPolicy, Stepper};
use atelier_settings::WorkshopConfig;

use crate::export::{ExportRow, COLUMNS};
use crate::memory_store::MemoryStore;

/// Page size used for the exported mockup document.
const EXPORT_PAGE: (u32, u32) = (794, 1123);

/// Application service owning the collaborator wiring for one session.
pub struct WorkshopService {
    config: WorkshopConfig,
    renderer: MockupRenderer,
    fallback: MemoryStore,
    store: Option<Arc<dyn DocumentStore>>,
    blobs: Option<Arc<dyn BlobStore>>,
    sink: Option<Arc<dyn TabularSink>>,
    rasterizer: Option<Arc<dyn Rasterizer>>,
    notifier: Option<Arc<dyn NotificationChannel>>,
    raster_timeout: Duration,
}

impl WorkshopService {
    pub fn new(config: WorkshopConfig) -> Self {
        let renderer = MockupRenderer::new(
            config.reference_canvas,
            ViewZones {
                safe_zone: config.front.safe_zone,
                torso_clip: config.front.torso_clip,
            },
            ViewZones {
                safe_zone: config.back.safe_zone,
                torso_clip: config.back.torso_clip,
            },
        );
        Self {
            config,
            renderer,
            fallback: MemoryStore::new(),
            store: None,
            blobs: None,
            sink: None,
            rasterizer: None,
            notifier: None,
            raster_timeout: Duration::from_secs(constants::RASTER_TIMEOUT_SECS),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_blob_store(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.blobs = Some(blobs);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn TabularSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationChannel>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_raster_timeout(mut self, timeout: Duration) -> Self {
        self.raster_timeout = timeout;
        self
    }

    pub fn config(&self) -> &WorkshopConfig {
        &self.config
    }

    pub fn renderer(&self) -> &MockupRenderer {
        &self.renderer
    }

    /// The local fallback store (also the session cache).
    pub fn fallback(&self) -> &MemoryStore {
        &self.fallback
    }

    /// Editor configuration derived from the workshop settings. One per
    /// editor instance; never shared through a global registry.
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            canvas: Size::new(
                self.config.reference_canvas.w,
                self.config.reference_canvas.h,
            ),
            reference: self.config.reference_canvas,
            front: ViewZone {
                safe_zone: self.config.front.safe_zone,
            },
            back: ViewZone {
                safe_zone: self.config.back.safe_zone,
            },
            boundary_slack: self.config.boundary_slack,
            scale_bounds: self.config.scale_bounds,
            preset_texts: self.config.preset_texts.clone(),
        }
    }

    fn revert_policy(&self) -> RevertPolicy {
        if self.config.cascade_revert {
            RevertPolicy::Cascade
        } else {
            RevertPolicy::Keep
        }
    }

    // ----- fiche lifecycle --------------------------------------------

    pub async fn create_fiche(
        &self,
        client_name: &str,
        phone: Phone,
        size: GarmentSize,
    ) -> Result<Fiche> {
        let fiche = Fiche::new(client_name, phone, size);
        self.save_fiche(&fiche).await?;
        debug!(id = %fiche.id, "fiche created");
        Ok(fiche)
    }

    /// Saves to the fallback unconditionally, then mirrors to the primary
    /// store; a failing primary degrades to a warning, never to a failed
    /// user action.
    pub async fn save_fiche(&self, fiche: &Fiche) -> Result<()> {
        self.fallback.save(fiche).await.map_err(Error::Store)?;
        if let Some(store) = &self.store {
            if let Err(e) = store.save(fiche).await {
                warn!(id = %fiche.id, error = %e, "primary store save failed, kept in-memory copy");
            }
        }
        Ok(())
    }

    pub async fn load_fiche(&self, id: Uuid) -> Result<Fiche> {
        if let Some(store) = &self.store {
            match store.load(id).await {
                Ok(fiche) => return Ok(fiche),
                Err(StoreError::Unavailable { reason }) => {
                    warn!(%id, reason, "primary store unavailable, using fallback");
                }
                Err(e) => return self.fallback.load(id).await.map_err(|_| Error::Store(e)),
            }
        }
        self.fallback.load(id).await.map_err(Error::Store)
    }

    pub async fn delete_fiche(&self, id: Uuid) -> Result<()> {
        let _ = self.fallback.delete(id).await;
        if let Some(store) = &self.store {
            if let Err(e) = store.delete(id).await {
                warn!(%id, error = %e, "primary store delete failed");
            }
        }
        Ok(())
    }

    /// Applies an ordinary edit; refused on validated fiches.
    pub async fn update_fiche(&self, id: Uuid, edit: FicheEdit) -> Result<Fiche> {
        let mut fiche = self.load_fiche(id).await?;
        fiche.apply(edit).map_err(Error::Fiche)?;
        self.save_fiche(&fiche).await?;
        Ok(fiche)
    }

    pub async fn set_validation(&self, id: Uuid, validated: bool) -> Result<Fiche> {
        let mut fiche = self.load_fiche(id).await?;
        if validated {
            fiche.validate();
        } else {
            fiche.unvalidate();
        }
        self.save_fiche(&fiche).await?;
        Ok(fiche)
    }

    // ----- editor integration -----------------------------------------

    /// Writes the editor's working state back onto the fiche.
    pub fn store_editor_state(&self, fiche: &mut Fiche, editor: &LogoEditor) -> Result<()> {
        fiche.ensure_editable().map_err(Error::Fiche)?;
        fiche.logos = editor.slots().clone();
        fiche.garment_color = Some(editor.garment_color().to_string());
        fiche.logo_color = Some(editor.logo_color().to_string());
        fiche.touch();
        Ok(())
    }

    /// Pushes an uploaded image payload to the blob store. Failure (or a
    /// missing blob store) keeps the raw bytes as the payload reference
    /// instead of failing the upload.
    pub async fn upload_logo(&self, fiche: &mut Fiche, view: View) -> Result<()> {
        let Some(LogoPayload::Image(image)) = fiche.logos.slot(view).payload().cloned() else {
            return Ok(());
        };
        let Some(blobs) = &self.blobs else {
            warn!(view = %view, "no blob store configured, keeping raw logo bytes");
            return Ok(());
        };
        let key = format!("{}-{}", fiche.id, view);
        match blobs.upload(&image.bytes, &key).await {
            Ok(Some(url)) => {
                debug!(view = %view, url, "logo uploaded");
                fiche.logos.slot_mut(view).set_remote_url(Some(url));
            }
            Ok(None) => {
                warn!(view = %view, "blob store returned no reference, keeping raw logo bytes");
            }
            Err(e) => {
                warn!(view = %view, error = %e, "blob upload failed, keeping raw logo bytes");
            }
        }
        self.save_fiche(fiche).await
    }

    // ----- export ------------------------------------------------------

    /// Submits one flat row to the tabular sink. Returns whether a row
    /// was actually handed over: a missing or failing sink degrades to
    /// `false` with a warning, never to a failed action.
    pub async fn export_row(&self, fiche: &Fiche) -> Result<bool> {
        let row = ExportRow::from_fiche(fiche);
        let Some(sink) = &self.sink else {
            warn!(id = %fiche.id, "no export sink configured, skipping row");
            return Ok(false);
        };
        match sink.submit(&COLUMNS, row.values()).await {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(id = %fiche.id, error = %e, "export sink rejected row");
                Ok(false)
            }
        }
    }

    /// Renders both views and hands them to the rasterizer, inside a
    /// capture stage that clears the editor selection first and restores
    /// interactivity on every exit path. The outbound call is bounded by
    /// the configured timeout; on failure no partial document exists.
    pub async fn export_document(
        &self,
        fiche: &Fiche,
        editor: &mut LogoEditor,
    ) -> Result<Vec<u8>> {
        let Some(rasterizer) = &self.rasterizer else {
            return Err(ExportError::RasterizerUnavailable.into());
        };

        let stage = CaptureStage::acquire(editor);
        let (w, h) = EXPORT_PAGE;
        let pages: Vec<String> = View::ALL
            .iter()
            .map(|view| self.renderer.render_fiche(fiche, *view).to_svg(w, h))
            .collect();

        let rendered = tokio::time::timeout(self.raster_timeout, rasterizer.render_document(&pages))
            .await
            .map_err(|_| {
                Error::Export(ExportError::Timeout {
                    secs: self.raster_timeout.as_secs(),
                })
            })?
            .map_err(|e| {
                Error::Export(ExportError::RasterizerFailed {
                    reason: e.to_string(),
                })
            })?;

        drop(stage);
        Ok(rendered)
    }

    // ----- production workflow ----------------------------------------

    pub fn stepper_for(&self, fiche: &Fiche) -> Stepper {
        Stepper::new(fiche.steps, self.revert_policy())
    }

    /// Commits a user-confirmed forward transition and persists it. The
    /// guards run again here; a refused step leaves the record unchanged.
    pub async fn confirm_step(&self, fiche: &mut Fiche, step: Step) -> Result<()> {
        let mut stepper = self.stepper_for(fiche);
        let confirmation = stepper.request(step).map_err(Error::Step)?;
        stepper.confirm(confirmation);
        fiche.steps = stepper.steps();
        fiche.touch();
        self.save_fiche(fiche).await
    }

    /// Reverts a set step (no confirmation) and persists the record.
    pub async fn revert_step(&self, fiche: &mut Fiche, step: Step) -> Result<()> {
        let mut stepper = self.stepper_for(fiche);
        stepper.revert(step).map_err(Error::Step)?;
        fiche.steps = stepper.steps();
        fiche.touch();
        self.save_fiche(fiche).await
    }

    /// Builds the pickup notification and opens the messaging deep link.
    /// Delivery is fire-and-forget: a failing channel logs a warning and
    /// the prefilled notification is still returned.
    pub async fn notify_client(&self, fiche: &Fiche) -> Result<ClientNotification> {
        let notification =
            ClientNotification::for_fiche(fiche, &self.config.notification_template)
                .map_err(Error::Step)?;
        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier
                .open(&notification.phone_e164, &notification.message)
                .await
            {
                warn!(id = %fiche.id, error = %e, "notification channel failed to open");
            }
        }
        Ok(notification)
    }
}

/// Scoped export capture: clears the editor selection and freezes
/// interaction for the duration of the capture, restoring the previous
/// state on drop, on success, failure and timeout alike.
struct CaptureStage<'a> {
    editor: &'a mut LogoEditor,
    was_enabled: bool,
}

impl<'a> CaptureStage<'a> {
    fn acquire(editor: &'a mut LogoEditor) -> Self {
        let was_enabled = editor.is_enabled();
        editor.clear_selection();
        editor.set_enabled(false);
        Self {
            editor,
            was_enabled,
        }
    }
}

impl Drop for CaptureStage<'_> {
    fn drop(&mut self) {
        self.editor.set_enabled(self.was_enabled);
    }
}
