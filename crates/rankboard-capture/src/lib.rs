//! Capture layer: talks to the page-rendering service to check that a profile
//! exists, read its rank, and keep a compressed screenshot as evidence.

mod capture;
mod compress;
mod error;
mod locator;
pub mod render;

pub use capture::{BrowserCapture, CaptureOutcome, PageLayout, ProfileCapture};
pub use compress::{SCALE, compress_png};
pub use error::CaptureError;
pub use locator::{DEFAULT_HOST, DEFAULT_REGION, ProfileLocator};
pub use render::{Element, RenderClient, RenderSession};
