//! # Product Registration Flow
//!
//! The scan-edit-validate-save cycle behind the register screen.
//!
//! ## Flow States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Registration Flow States                            │
//! │                                                                         │
//! │        scan / edit fields                                               │
//! │       ┌──────────────┐                                                  │
//! │       ▼              │                                                  │
//! │   ┌────────┐         │      save()       ┌────────────┐                │
//! │   │Editing │─────────┴──────────────────►│ Validating │                │
//! │   └────────┘                             └─────┬──────┘                │
//! │       ▲                                        │                        │
//! │       │ field errors / duplicate /             ▼                        │
//! │       │ store failure (form kept)        ┌────────────┐                │
//! │       ├───────────────────────────────── │   Saving   │                │
//! │       │                                  └─────┬──────┘                │
//! │       │ dismiss_success()                      │ insert ok             │
//! │       │       ┌────────────┐                   │ (form cleared)        │
//! │       └───────│  Success   │◄──────────────────┘                       │
//! │               └────────────┘                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - The barcode only ever arrives through a scan; there is no typed entry
//! - Barcode uniqueness is checked at scan time AND re-checked at save
//!   time, because another device can register the code in between
//! - A failed save keeps every field so the user can retry without
//!   retyping; only a successful save clears the form
//! - Editing a field clears that field's error, nothing else

use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info};

use bodega_core::{
    validation::{form_is_valid, validate_form},
    FormErrors, ProductForm, ValidationError,
};
use bodega_store::{DocumentStore, ProductRepository};

use crate::error::FlowError;
use crate::scanner::{ScanEvent, ScanSession};

/// How long the success banner stays up by default (milliseconds).
pub const DEFAULT_SUCCESS_DISPLAY_MS: u64 = 1500;

// =============================================================================
// Phases and Scan Outcomes
// =============================================================================

/// Where the registration flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationPhase {
    /// Fields are editable; this is where the flow spends its life.
    Editing,

    /// Field rules are being checked.
    Validating,

    /// The insert is in flight.
    Saving,

    /// The product was written; the success banner is up.
    Success,
}

/// What a camera read amounted to once the flow handled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The code is unused; it is now on the form and the session closed.
    Accepted { barcode: String },

    /// The code already belongs to a product. The session stays open so
    /// the user can scan a different item.
    Duplicate { barcode: String },

    /// The session ignored the read: format not in the allow-list.
    UnsupportedFormat,

    /// The session ignored the read: code already handled this visit.
    RepeatRead,

    /// The session ignored the read: it is closed.
    SessionClosed,
}

// =============================================================================
// Registration Flow
// =============================================================================

/// Drives one register screen: form state, scan handling, save.
///
/// One flow instance per screen visit. [`close`](Self::close) models the
/// screen unmounting; a closed flow refuses saves and scans and ignores
/// field edits.
pub struct RegistrationFlow<S> {
    repo: ProductRepository<S>,
    form: ProductForm,
    errors: FormErrors,
    phase: RegistrationPhase,
    closed: bool,
    success_display: Duration,
}

impl<S: DocumentStore> RegistrationFlow<S> {
    /// Creates a flow over the given repository.
    pub fn new(repo: ProductRepository<S>) -> Self {
        RegistrationFlow {
            repo,
            form: ProductForm::new(),
            errors: FormErrors::new(),
            phase: RegistrationPhase::Editing,
            closed: false,
            success_display: Duration::from_millis(DEFAULT_SUCCESS_DISPLAY_MS),
        }
    }

    /// Sets how long the success banner stays up.
    pub fn with_success_display(mut self, duration: Duration) -> Self {
        self.success_display = duration;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The form as currently edited.
    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    /// Current per-field error messages.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Current phase.
    pub fn phase(&self) -> RegistrationPhase {
        self.phase
    }

    /// True once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the save button should be enabled.
    pub fn can_save(&self, today: NaiveDate) -> bool {
        !self.closed
            && self.phase == RegistrationPhase::Editing
            && form_is_valid(&self.form, today)
    }

    // =========================================================================
    // Field Edits
    // =========================================================================
    // Each setter sanitizes through the form and clears that field's
    // error, mirroring per-keystroke behavior. A closed flow drops edits.

    /// Updates the product name.
    pub fn set_product_name(&mut self, raw: &str) {
        if self.closed {
            return;
        }
        self.form.set_product_name(raw);
        self.errors.remove("productName");
    }

    /// Updates the brand.
    pub fn set_brand(&mut self, raw: &str) {
        if self.closed {
            return;
        }
        self.form.set_brand(raw);
        self.errors.remove("brand");
    }

    /// Updates the stock text.
    pub fn set_stock(&mut self, raw: &str) {
        if self.closed {
            return;
        }
        self.form.set_stock(raw);
        self.errors.remove("stock");
    }

    /// Updates the category picker value.
    pub fn set_category(&mut self, label: &str) {
        if self.closed {
            return;
        }
        self.form.set_category(label);
        self.errors.remove("category");
    }

    /// Updates the purchase price text.
    pub fn set_purchase_price(&mut self, raw: &str) {
        if self.closed {
            return;
        }
        self.form.set_purchase_price(raw);
        self.errors.remove("purchasePrice");
    }

    /// Updates the sale price text.
    pub fn set_sale_price(&mut self, raw: &str) {
        if self.closed {
            return;
        }
        self.form.set_sale_price(raw);
        self.errors.remove("salePrice");
    }

    /// Updates the expiration date.
    pub fn set_expiration_date(&mut self, date: NaiveDate) {
        if self.closed {
            return;
        }
        self.form.set_expiration_date(date);
        self.errors.remove("expirationDate");
    }

    /// Drops the scanned barcode so a new scan session can run.
    pub fn clear_barcode(&mut self) {
        if self.closed {
            return;
        }
        self.form.clear_barcode();
        self.errors.remove("barcode");
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Routes one camera read through the session and onto the form.
    ///
    /// A fresh code costs one uniqueness check against the store. If the
    /// code is unused it lands on the form and the session closes; if it
    /// is taken, a `barcode` field error is recorded and the session
    /// stays open for another item. Repeat reads of either kind are
    /// absorbed by the session without touching the store.
    pub async fn apply_scan(
        &mut self,
        session: &mut ScanSession,
        format: &str,
        data: &str,
    ) -> Result<ScanOutcome, FlowError> {
        if self.closed {
            return Err(FlowError::closed());
        }

        match session.submit(format, data) {
            ScanEvent::Fresh(code) => {
                if self.repo.barcode_in_use(&code).await? {
                    debug!(barcode = %code, "Scanned barcode already registered");
                    self.errors.insert(
                        "barcode",
                        ValidationError::Duplicate {
                            field: "barcode".to_string(),
                            value: code.clone(),
                        },
                    );
                    Ok(ScanOutcome::Duplicate { barcode: code })
                } else {
                    self.form.set_barcode(code.clone());
                    self.errors.remove("barcode");
                    session.close();
                    Ok(ScanOutcome::Accepted { barcode: code })
                }
            }
            ScanEvent::UnsupportedFormat => Ok(ScanOutcome::UnsupportedFormat),
            ScanEvent::RepeatRead => Ok(ScanOutcome::RepeatRead),
            ScanEvent::Closed => Ok(ScanOutcome::SessionClosed),
        }
    }

    // =========================================================================
    // Saving
    // =========================================================================

    /// Validates the whole form and writes the product.
    ///
    /// `today` is the exclusive lower bound for the expiration date.
    ///
    /// ## Outcomes
    /// - Field rules fail: per-field errors recorded, form kept
    /// - Barcode taken since scanning: `barcode` error recorded, form kept
    /// - Store write fails: form kept, error marked retryable
    /// - Success: form and errors cleared, phase moves to `Success`
    pub async fn save(&mut self, today: NaiveDate) -> Result<String, FlowError> {
        if self.closed {
            return Err(FlowError::closed());
        }

        self.phase = RegistrationPhase::Validating;
        let new_product = match validate_form(&self.form, today) {
            Ok(product) => product,
            Err(errors) => {
                self.phase = RegistrationPhase::Editing;
                self.errors = errors.clone();
                return Err(errors.into());
            }
        };

        // The scan-time check is stale by now; re-check before writing.
        match self.repo.barcode_in_use(&new_product.barcode).await {
            Ok(false) => {}
            Ok(true) => {
                self.phase = RegistrationPhase::Editing;
                self.errors.insert(
                    "barcode",
                    ValidationError::Duplicate {
                        field: "barcode".to_string(),
                        value: new_product.barcode.clone(),
                    },
                );
                return Err(FlowError::duplicate_barcode(&new_product.barcode));
            }
            Err(err) => {
                self.phase = RegistrationPhase::Editing;
                return Err(err.into());
            }
        }

        self.phase = RegistrationPhase::Saving;
        match self.repo.insert(&new_product).await {
            Ok(id) => {
                info!(id = %id, barcode = %new_product.barcode, "Product registered");
                self.form.clear();
                self.errors = FormErrors::new();
                self.phase = RegistrationPhase::Success;
                Ok(id)
            }
            Err(err) => {
                // The form survives so the user can retry without retyping.
                self.phase = RegistrationPhase::Editing;
                Err(err.into())
            }
        }
    }

    /// Holds the success banner up, then returns to editing.
    ///
    /// No-op outside the `Success` phase.
    pub async fn dismiss_success(&mut self) {
        if self.phase != RegistrationPhase::Success {
            return;
        }
        tokio::time::sleep(self.success_display).await;
        self.phase = RegistrationPhase::Editing;
    }

    /// Closes the flow. Models the screen unmounting.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
