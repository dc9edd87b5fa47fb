//! # Page Controllers
//!
//! Six independent controllers, each owning its own state and the elements
//! it found at mount time. A controller whose elements are missing is simply
//! not mounted.

pub mod carousel;
pub mod contact;
pub mod cursor;
pub mod hero;
pub mod nav;
pub mod reveal;

pub use carousel::{CarouselRotator, RotationState};
pub use contact::{ContactForm, SubmissionState};
pub use cursor::CustomCursor;
pub use hero::{overlay_opacity, HeroFader};
pub use nav::NavHighlighter;
pub use reveal::RevealAnimator;
