//! Dealer blocks: contact details, social links and legal disclaimers

pub mod contact;
pub mod legal;
pub mod social_links;

pub use contact::ContactProps;
pub use legal::LegalProps;
pub use social_links::{SocialLink, SocialLinksProps, SocialPlatform};
