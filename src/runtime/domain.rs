//! Domain intent validation
//!
//! Checks a requested [`DomainConfig`] and computes the public address it
//! would give the site. Nothing is provisioned here; a successful result is
//! only recorded as intent on the site.

use serde::{Deserialize, Serialize};

use crate::core::site::{validate_slug, DomainConfig};

/// Subdomains the platform keeps for itself
const RESERVED_SUBDOMAINS: &[&str] = &["www", "api", "app", "admin", "mail", "static"];

/// Outcome of a domain request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResult {
    pub success: bool,
    pub message: String,
    /// Public address when successful
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl DomainResult {
    fn ok(address: String) -> Self {
        Self {
            message: format!("Site will be served at {}", address),
            success: true,
            address: Some(address),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            address: None,
        }
    }
}

/// Validate a domain request against the platform's own domain.
pub fn validate_domain(config: &DomainConfig, platform_domain: &str) -> DomainResult {
    let platform = platform_domain.trim().to_ascii_lowercase();
    match config {
        DomainConfig::Subdomain { subdomain } => {
            let sub = subdomain.trim().to_ascii_lowercase();
            if let Err(message) = check_subdomain(&sub) {
                return DomainResult::rejected(message);
            }
            DomainResult::ok(format!("https://{}.{}", sub, platform))
        }
        DomainConfig::CustomDomain { domain } => {
            let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
            if let Err(message) = check_hostname(&domain) {
                return DomainResult::rejected(message);
            }
            if domain == platform || domain.ends_with(&format!(".{}", platform)) {
                return DomainResult::rejected(format!(
                    "{} belongs to the platform; request a subdomain instead",
                    domain
                ));
            }
            DomainResult::ok(format!("https://{}", domain))
        }
        DomainConfig::SubdomainOnCustomBase {
            subdomain,
            base_domain,
        } => {
            let sub = subdomain.trim().to_ascii_lowercase();
            let base = base_domain.trim().trim_end_matches('.').to_ascii_lowercase();
            if let Err(message) = check_label(&sub) {
                return DomainResult::rejected(format!("Subdomain: {}", message));
            }
            if let Err(message) = check_hostname(&base) {
                return DomainResult::rejected(format!("Base domain: {}", message));
            }
            DomainResult::ok(format!("https://{}.{}", sub, base))
        }
        DomainConfig::DealerGroup {
            group_domain,
            dealer_slug,
        } => {
            let group = group_domain.trim().trim_end_matches('.').to_ascii_lowercase();
            if let Err(message) = check_hostname(&group) {
                return DomainResult::rejected(format!("Group domain: {}", message));
            }
            let slug = validate_slug(dealer_slug.trim());
            if let Some(message) = slug.errors.first() {
                return DomainResult::rejected(format!("Dealer slug: {}", message));
            }
            DomainResult::ok(format!("https://{}/{}", group, dealer_slug.trim()))
        }
    }
}

fn check_subdomain(sub: &str) -> Result<(), String> {
    check_label(sub)?;
    if RESERVED_SUBDOMAINS.contains(&sub) {
        return Err(format!("'{}' is reserved", sub));
    }
    Ok(())
}

/// One DNS label: 1-63 chars of `[a-z0-9-]`, no leading or trailing dash.
fn check_label(label: &str) -> Result<(), String> {
    if label.is_empty() {
        return Err("label is empty".into());
    }
    if label.len() > 63 {
        return Err(format!("'{}' is longer than 63 characters", label));
    }
    if !label.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(format!(
            "'{}' may only contain letters, digits and dashes",
            label
        ));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(format!("'{}' cannot start or end with a dash", label));
    }
    Ok(())
}

/// At least two labels, at most 253 characters, alphabetic top-level label.
fn check_hostname(host: &str) -> Result<(), String> {
    if host.is_empty() {
        return Err("domain is empty".into());
    }
    if host.len() > 253 {
        return Err("domain is longer than 253 characters".into());
    }
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return Err(format!("'{}' needs a top-level domain", host));
    }
    for label in &labels {
        check_label(label)?;
    }
    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("'{}' is not a valid top-level domain", tld));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATFORM: &str = "dealersites.app";

    #[test]
    fn test_subdomain() {
        let ok = validate_domain(
            &DomainConfig::Subdomain { subdomain: "Main-St".into() },
            PLATFORM,
        );
        assert!(ok.success);
        assert_eq!(ok.address.as_deref(), Some("https://main-st.dealersites.app"));

        let long = "a".repeat(64);
        for bad in ["", "-main", "main_st", "www", long.as_str()] {
            let result = validate_domain(&DomainConfig::Subdomain { subdomain: bad.into() }, PLATFORM);
            assert!(!result.success, "{} should be rejected", bad);
            assert!(result.address.is_none());
        }
    }

    #[test]
    fn test_custom_domain() {
        let ok = validate_domain(
            &DomainConfig::CustomDomain { domain: "www.MainStMotors.com.".into() },
            PLATFORM,
        );
        assert_eq!(ok.address.as_deref(), Some("https://www.mainstmotors.com"));

        assert!(!validate_domain(&DomainConfig::CustomDomain { domain: "localhost".into() }, PLATFORM).success);
        assert!(!validate_domain(&DomainConfig::CustomDomain { domain: "shop.example.123".into() }, PLATFORM).success);
        assert!(!validate_domain(&DomainConfig::CustomDomain { domain: "evil.dealersites.app".into() }, PLATFORM).success);
        assert!(!validate_domain(&DomainConfig::CustomDomain { domain: "bad..com".into() }, PLATFORM).success);
    }

    #[test]
    fn test_subdomain_on_custom_base_and_group() {
        let ok = validate_domain(
            &DomainConfig::SubdomainOnCustomBase {
                subdomain: "ford".into(),
                base_domain: "mainstmotors.com".into(),
            },
            PLATFORM,
        );
        assert_eq!(ok.address.as_deref(), Some("https://ford.mainstmotors.com"));

        let group = validate_domain(
            &DomainConfig::DealerGroup {
                group_domain: "autogroup.com".into(),
                dealer_slug: "main-st-motors".into(),
            },
            PLATFORM,
        );
        assert_eq!(group.address.as_deref(), Some("https://autogroup.com/main-st-motors"));

        let bad = validate_domain(
            &DomainConfig::DealerGroup {
                group_domain: "autogroup.com".into(),
                dealer_slug: "Main St".into(),
            },
            PLATFORM,
        );
        assert!(!bad.success);
        assert!(bad.message.starts_with("Dealer slug:"));
    }
}
