//! Content blocks: headlines, copy, feature lists and calls to action

pub mod cta;
pub mod features;
pub mod hero;
pub mod multi_text;
pub mod text;

pub use cta::{ButtonVariant, CtaProps};
pub use features::{FeatureItem, FeaturesProps};
pub use hero::HeroProps;
pub use multi_text::{MultiTextProps, TextColumn};
pub use text::TextProps;
