//! Setup errors raised while activating the page subsystems.
//!
//! None of these are recoverable at runtime: a subsystem that fails to set up
//! is simply not activated and the page stays static.

/// Reasons a subsystem refuses to initialize.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
	/// A carousel needs at least one slide.
	#[error("carousel requires at least one slide")]
	EmptyCarousel,

	/// The canvas could not hand out a 2D drawing context.
	#[error("drawing surface unavailable: {0}")]
	SurfaceUnavailable(String),

	/// A browser API the subsystem depends on is missing.
	#[error("browser capability missing: {0}")]
	MissingCapability(&'static str),

	/// Configuration parsed but holds values the simulation cannot run with.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// Configuration JSON could not be parsed.
	#[error("failed to parse configuration")]
	Parse(#[from] serde_json::Error),
}
