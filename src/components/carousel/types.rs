//! Slide data structures for input to the carousel component.

use serde::Deserialize;

/// One page of the carousel.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Slide {
	/// Heading text.
	pub title: String,
	/// Body text shown under the title.
	#[serde(default)]
	pub body: String,
	/// Optional image URL rendered above the title.
	pub image: Option<String>,
}
