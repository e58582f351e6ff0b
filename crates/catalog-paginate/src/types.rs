use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaginateError {
    #[error("Unknown layout tag: {0}")]
    InvalidLayoutTag(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaginateError>;

/// Maximum number of external-URL page slots a configuration may carry
pub const MAX_URL_SLOTS: usize = 4;

/// Page layout kinds
///
/// Each tag fixes how many item slots a page of that kind holds. Capacity is
/// a total function over the enumeration; unknown tags only exist at the
/// configuration-text boundary, where parsing fails with `InvalidLayoutTag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutTag {
    /// One full-page item
    Single,
    /// Two items stacked vertically
    TwoUp,
    /// 2×2 item grid (default catalogue layout)
    #[default]
    FourUp,
    /// 2×4 item grid
    EightUp,
}

impl LayoutTag {
    /// Item slots per page of this layout
    pub fn capacity(self) -> usize {
        match self {
            LayoutTag::Single => 1,
            LayoutTag::TwoUp => 2,
            LayoutTag::FourUp => 4,
            LayoutTag::EightUp => 8,
        }
    }

    /// Grid shape (columns, rows) used when rendering a page of this layout
    pub fn grid_dimensions(self) -> (usize, usize) {
        match self {
            LayoutTag::Single => (1, 1),
            LayoutTag::TwoUp => (1, 2),
            LayoutTag::FourUp => (2, 2),
            LayoutTag::EightUp => (2, 4),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayoutTag::Single => "single",
            LayoutTag::TwoUp => "two-up",
            LayoutTag::FourUp => "four-up",
            LayoutTag::EightUp => "eight-up",
        }
    }
}

impl std::str::FromStr for LayoutTag {
    type Err = PaginateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(LayoutTag::Single),
            "two-up" => Ok(LayoutTag::TwoUp),
            "four-up" => Ok(LayoutTag::FourUp),
            "eight-up" => Ok(LayoutTag::EightUp),
            other => Err(PaginateError::InvalidLayoutTag(other.to_string())),
        }
    }
}

/// Barcode symbologies an item may be overridden to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarcodeKind {
    #[default]
    Ean13,
    Code128,
    QrCode,
}

impl BarcodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            BarcodeKind::Ean13 => "ean-13",
            BarcodeKind::Code128 => "code-128",
            BarcodeKind::QrCode => "qr",
        }
    }
}

/// One catalogue item as supplied by the product source
///
/// The core never interprets anything beyond `identifier` stability;
/// `display_title` is carried for diagnostics and `href` feeds the rendered
/// page's clickable region when present.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub identifier: String,
    pub display_title: String,
    pub href: Option<String>,
}

/// One external-URL page slot from the configuration
///
/// `page_index: None` means the slot is configured but not placed in the
/// sequence. The slot's position in the configuration list is its stable
/// identity across reorders.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UrlPageSlot {
    pub url: String,
    pub title: Option<String>,
    pub page_index: Option<usize>,
}

/// One page's worth of content
///
/// Either a run of item indices sharing one effective layout, or a synthetic
/// marker page. Item and synthetic content never mix within a group.
#[derive(Debug, Clone, PartialEq)]
pub enum PageGroup {
    Items {
        /// Original item indices, in display order. Never empty.
        indices: Vec<usize>,
        /// Effective layout shared by every item in the group
        layout: LayoutTag,
    },
    ExternalUrl {
        /// Which configuration slot this page came from
        slot: usize,
        url: String,
        title: Option<String>,
    },
    Summary,
}

impl PageGroup {
    pub fn is_items(&self) -> bool {
        matches!(self, PageGroup::Items { .. })
    }

    pub fn is_synthetic(&self) -> bool {
        !self.is_items()
    }

    /// Number of items on this page (0 for synthetic pages)
    pub fn item_count(&self) -> usize {
        match self {
            PageGroup::Items { indices, .. } => indices.len(),
            _ => 0,
        }
    }
}

/// The document's page order - the central mutable artifact
pub type PageSequence = Vec<PageGroup>;
