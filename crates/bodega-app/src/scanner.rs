//! # Barcode Scan Sessions
//!
//! Turns the camera's raw read events into at-most-one usable code.
//!
//! ## Why a Session
//! A camera fires the same barcode many times per second while it is in
//! frame. Without dedup, every frame would trigger a store lookup and the
//! duplicate-barcode alert would stack. A [`ScanSession`] lives for one
//! visit to the scanner screen and absorbs that noise:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One Scanner Visit                                │
//! │                                                                         │
//! │  camera events          ScanSession            registration flow        │
//! │  ─────────────          ───────────            ─────────────────        │
//! │                                                                         │
//! │  ean13 "750..."  ──►  Fresh("750...")   ──►  uniqueness check (store)  │
//! │  ean13 "750..."  ──►  RepeatRead             (no second check)         │
//! │  pdf417 "xyz"    ──►  UnsupportedFormat                                │
//! │  ean13 "751..."  ──►  Fresh("751...")   ──►  accepted, session closed  │
//! │  ean13 "752..."  ──►  Closed                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session itself never touches the store. It only decides which reads
//! are worth acting on; the registration flow owns what happens next.

use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Barcode Format
// =============================================================================

/// Barcode symbologies the scanner accepts.
///
/// The camera is configured with exactly this list; anything else it can
/// decode (PDF417, Aztec, ...) is ignored rather than half-supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeFormat {
    /// QR codes, used by some suppliers for internal SKUs
    Qr,

    /// EAN-13, the retail standard for packaged goods
    Ean13,

    /// Code 128, common on shipping and warehouse labels
    Code128,
}

impl BarcodeFormat {
    /// Every supported format, in camera-configuration order.
    pub const ALL: [BarcodeFormat; 3] =
        [BarcodeFormat::Qr, BarcodeFormat::Ean13, BarcodeFormat::Code128];

    /// Parses a camera format name.
    ///
    /// Names are matched case-insensitively after trimming, so config
    /// files can write `EAN13` and camera events can send `ean13`.
    ///
    /// ## Example
    /// ```rust
    /// use bodega_app::scanner::BarcodeFormat;
    ///
    /// assert_eq!(BarcodeFormat::parse("ean13"), Some(BarcodeFormat::Ean13));
    /// assert_eq!(BarcodeFormat::parse(" QR "), Some(BarcodeFormat::Qr));
    /// assert_eq!(BarcodeFormat::parse("pdf417"), None);
    /// ```
    pub fn parse(name: &str) -> Option<BarcodeFormat> {
        match name.trim().to_ascii_lowercase().as_str() {
            "qr" => Some(BarcodeFormat::Qr),
            "ean13" => Some(BarcodeFormat::Ean13),
            "code128" => Some(BarcodeFormat::Code128),
            _ => None,
        }
    }

    /// The camera-facing name of this format.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BarcodeFormat::Qr => "qr",
            BarcodeFormat::Ean13 => "ean13",
            BarcodeFormat::Code128 => "code128",
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Scan Events
// =============================================================================

/// What a submitted camera read amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A code this session has not seen before. Worth acting on.
    Fresh(String),

    /// The format is not in this session's allow-list, or the read
    /// carried no payload.
    UnsupportedFormat,

    /// A code this session already handed out. The caller has already
    /// decided what to do with it once.
    RepeatRead,

    /// The session is closed; the read happened after its code was
    /// accepted or the screen was left.
    Closed,
}

// =============================================================================
// Scan Session
// =============================================================================

/// Dedup and format filtering for one visit to the scanner screen.
///
/// ## Example
/// ```rust
/// use bodega_app::scanner::{ScanEvent, ScanSession};
///
/// let mut session = ScanSession::new();
/// assert_eq!(
///     session.submit("ean13", "7501031311309"),
///     ScanEvent::Fresh("7501031311309".to_string()),
/// );
/// assert_eq!(session.submit("ean13", "7501031311309"), ScanEvent::RepeatRead);
///
/// session.close();
/// assert_eq!(session.submit("ean13", "7501031311309"), ScanEvent::Closed);
/// ```
#[derive(Debug, Clone)]
pub struct ScanSession {
    /// Formats this session accepts.
    formats: Vec<BarcodeFormat>,

    /// Every code already returned as `Fresh`, including rejected ones.
    /// A duplicate product stays remembered so it cannot re-trigger the
    /// uniqueness check while it sits in front of the camera.
    seen: HashSet<String>,

    /// Closed sessions swallow all further reads.
    open: bool,
}

impl ScanSession {
    /// Creates a session accepting every supported format.
    pub fn new() -> Self {
        ScanSession::with_formats(BarcodeFormat::ALL.to_vec())
    }

    /// Creates a session with a custom format allow-list.
    pub fn with_formats(formats: Vec<BarcodeFormat>) -> Self {
        ScanSession {
            formats,
            seen: HashSet::new(),
            open: true,
        }
    }

    /// Feeds one camera read through the session.
    ///
    /// `format` is the camera's format name for the read; `data` is the
    /// decoded payload. Payloads are trimmed, and a blank payload counts
    /// as unsupported.
    pub fn submit(&mut self, format: &str, data: &str) -> ScanEvent {
        if !self.open {
            return ScanEvent::Closed;
        }

        let known = match BarcodeFormat::parse(format) {
            Some(parsed) if self.formats.contains(&parsed) => parsed,
            _ => return ScanEvent::UnsupportedFormat,
        };

        let code = data.trim();
        if code.is_empty() {
            return ScanEvent::UnsupportedFormat;
        }

        if !self.seen.insert(code.to_string()) {
            return ScanEvent::RepeatRead;
        }

        tracing::debug!(format = %known, code, "Fresh barcode read");
        ScanEvent::Fresh(code.to_string())
    }

    /// Closes the session. Every later read returns [`ScanEvent::Closed`].
    pub fn close(&mut self) {
        self.open = false;
    }

    /// True until [`close`](Self::close) is called.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The formats this session accepts.
    pub fn formats(&self) -> &[BarcodeFormat] {
        &self.formats
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        ScanSession::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
