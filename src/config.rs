//! Site-wide configuration read from the page.

use serde::Deserialize;

use crate::components::carousel::CarouselConfig;
use crate::components::particle_field::FieldConfig;
use crate::error::SetupError;

/// Configuration for both page subsystems. Omitted sections and fields keep
/// their defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
	/// Particle backdrop tunables.
	pub backdrop: FieldConfig,
	/// Carousel layout and autoplay timing.
	pub carousel: CarouselConfig,
}

impl SiteConfig {
	/// Parse and validate a JSON configuration document.
	pub fn from_json(json: &str) -> Result<Self, SetupError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Check every section.
	pub fn validate(&self) -> Result<(), SetupError> {
		self.backdrop.validate()?;
		self.carousel.validate()
	}
}
