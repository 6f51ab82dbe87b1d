//! Brand types.

use crate::ids::BrandId;
use serde::{Deserialize, Serialize};

/// Default logo display size, in percent.
pub const DEFAULT_LOGO_SIZE: u32 = 100;

/// A manufacturer brand carried by the retailer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    /// Unique brand identifier.
    pub id: BrandId,
    /// Brand name.
    pub name: String,
    /// Logo image URL.
    pub logo: Option<String>,
    /// Logo display size as a percentage of the default.
    pub logo_size: u32,
    /// Downloadable technical catalogues for this brand.
    pub catalogues: Vec<BrandCatalogue>,
}

impl Brand {
    /// Create a new brand with the default logo size.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BrandId::generate(),
            name: name.into(),
            logo: None,
            logo_size: DEFAULT_LOGO_SIZE,
            catalogues: Vec::new(),
        }
    }

    /// Attach a downloadable catalogue.
    pub fn add_catalogue(&mut self, name: impl Into<String>, pdf: impl Into<String>) {
        self.catalogues.push(BrandCatalogue {
            name: name.into(),
            pdf: pdf.into(),
        });
    }
}

/// A downloadable technical document attached to a brand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandCatalogue {
    /// Display name of the document.
    pub name: String,
    /// URL of the PDF.
    pub pdf: String,
}
