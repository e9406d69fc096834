use serde::{Deserialize, Serialize};

/// Kind of sellable stock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    #[serde(rename = "Fabricación")]
    Manufactured,
    #[serde(rename = "Reventa")]
    Resale,
}

impl ProductKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Manufactured => "Fabricación",
            ProductKind::Resale => "Reventa",
        }
    }

    /// Code prefix used in inventory reports ("VAR-12", "REV-3")
    pub fn code_prefix(&self) -> &'static str {
        match self {
            ProductKind::Manufactured => "VAR",
            ProductKind::Resale => "REV",
        }
    }
}
