use std::sync::{Arc, LazyLock};

use atelier_core::models::{RejectionReason, ValidationVerdict};
use regex::Regex;

use super::lists::{DISPOSABLE_DOMAINS, ROLE_ACCOUNTS, TYPO_DOMAINS};
use super::resolver::{MxLookup, MxResolver};

/// `local@domain`, final domain label at least two letters
static EMAIL_FORMAT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

/// Contact-form email plausibility checker.
///
/// Stages run in a fixed order and stop at the first rejection:
/// format, domain extraction, disposable domain, role account, known typo domain,
/// then the MX lookup when a resolver is configured. A failed lookup skips the
/// MX stage instead of rejecting the address.
#[derive(Clone, Default)]
pub struct EmailValidator {
    resolver: Option<Arc<dyn MxResolver>>,
}

impl EmailValidator {
    /// Validator running only the static checks
    pub fn new() -> Self {
        Self { resolver: None }
    }

    /// Validator that also checks the domain publishes MX records
    pub fn with_resolver(resolver: Arc<dyn MxResolver>) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    pub fn checks_mx(&self) -> bool {
        self.resolver.is_some()
    }

    /// Run every check and return the verdict
    pub async fn validate(&self, address: &str) -> ValidationVerdict {
        let domain = match check_static(address) {
            Ok(domain) => domain,
            Err(reason) => return reject(reason),
        };

        if let Some(resolver) = &self.resolver {
            match resolver.lookup_mx(&domain).await {
                MxLookup::Found(count) => {
                    tracing::debug!(domain = %domain, mx_records = count, "MX records found");
                }
                MxLookup::NoRecords => return reject(RejectionReason::NoMailServer),
                MxLookup::Failed(error) => {
                    tracing::warn!(domain = %domain, error = %error, "MX lookup failed, skipping check");
                }
            }
        }

        ValidationVerdict::valid()
    }
}

fn reject(reason: RejectionReason) -> ValidationVerdict {
    tracing::debug!(reason = reason.code(), "Email address rejected");
    ValidationVerdict::rejected(reason)
}

/// Format and deny-list stages. Returns the lowercased domain on success.
pub fn check_static(address: &str) -> Result<String, RejectionReason> {
    let well_formed = EMAIL_FORMAT
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(address));
    if !well_formed {
        return Err(RejectionReason::InvalidFormat);
    }

    let (local, domain) = address
        .rsplit_once('@')
        .ok_or(RejectionReason::InvalidFormat)?;
    if domain.is_empty() {
        return Err(RejectionReason::InvalidDomain);
    }

    let domain = domain.to_lowercase();
    let local = local.to_lowercase();

    if DISPOSABLE_DOMAINS
        .iter()
        .any(|disposable| domain.ends_with(disposable))
    {
        return Err(RejectionReason::DisposableEmail);
    }

    if ROLE_ACCOUNTS.contains(&local.as_str()) {
        return Err(RejectionReason::RoleBasedEmail);
    }

    if TYPO_DOMAINS.contains(&domain.as_str()) {
        return Err(RejectionReason::InvalidDomainSpelling);
    }

    Ok(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedResolver {
        answer: MxLookup,
        queried: Mutex<Vec<String>>,
    }

    impl FixedResolver {
        fn new(answer: MxLookup) -> Arc<Self> {
            Arc::new(Self {
                answer,
                queried: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl MxResolver for FixedResolver {
        async fn lookup_mx(&self, domain: &str) -> MxLookup {
            self.queried.lock().unwrap().push(domain.to_string());
            self.answer.clone()
        }
    }

    async fn verdict(address: &str) -> ValidationVerdict {
        EmailValidator::new().validate(address).await
    }

    #[test]
    fn format_pattern_compiles() {
        assert!(EMAIL_FORMAT.is_some());
    }

    #[tokio::test]
    async fn malformed_addresses_fail_format() {
        for address in [
            "not-an-email",
            "",
            "a@b",
            "a@b.c",
            "@example.org",
            "jane@",
            "jane doe@example.org",
            "jane@exa mple.org",
            "jane@example.o1",
        ] {
            assert_eq!(
                verdict(address).await,
                ValidationVerdict::rejected(RejectionReason::InvalidFormat),
                "{:?}",
                address
            );
        }
    }

    #[tokio::test]
    async fn well_formed_address_is_valid() {
        assert_eq!(verdict("jane.doe+site@studio.io").await, ValidationVerdict::valid());
    }

    #[tokio::test]
    async fn disposable_domains_match_any_subdomain_depth() {
        for address in [
            "a@mailinator.com",
            "a@sub.mailinator.com",
            "a@deep.sub.MAILINATOR.com",
        ] {
            assert_eq!(
                verdict(address).await,
                ValidationVerdict::rejected(RejectionReason::DisposableEmail)
            );
        }
    }

    #[tokio::test]
    async fn role_accounts_are_case_insensitive() {
        assert_eq!(
            verdict("Admin@example.org").await,
            ValidationVerdict::rejected(RejectionReason::RoleBasedEmail)
        );
        assert_eq!(
            verdict("SUPPORT@studio.io").await,
            ValidationVerdict::rejected(RejectionReason::RoleBasedEmail)
        );
    }

    #[tokio::test]
    async fn typo_domains_are_rejected() {
        assert_eq!(
            verdict("jane@gmial.com").await,
            ValidationVerdict::rejected(RejectionReason::InvalidDomainSpelling)
        );
        assert_eq!(
            verdict("jane@Example.com").await,
            ValidationVerdict::rejected(RejectionReason::InvalidDomainSpelling)
        );
        assert_eq!(verdict("jane@example.org").await, ValidationVerdict::valid());
    }

    #[tokio::test]
    async fn stages_run_in_order() {
        // Role account on a disposable domain reports the disposable stage first
        assert_eq!(
            verdict("admin@mailinator.com").await,
            ValidationVerdict::rejected(RejectionReason::DisposableEmail)
        );
        // Role account on a typo domain reports the role stage first
        assert_eq!(
            verdict("admin@gmial.com").await,
            ValidationVerdict::rejected(RejectionReason::RoleBasedEmail)
        );
    }

    #[tokio::test]
    async fn domain_without_mx_records_is_rejected() {
        let resolver = FixedResolver::new(MxLookup::NoRecords);
        let validator = EmailValidator::with_resolver(resolver.clone());

        assert_eq!(
            validator.validate("jane@Studio.io").await,
            ValidationVerdict::rejected(RejectionReason::NoMailServer)
        );
        assert_eq!(*resolver.queried.lock().unwrap(), vec!["studio.io".to_string()]);
    }

    #[tokio::test]
    async fn failed_lookup_fails_open() {
        let validator = EmailValidator::with_resolver(FixedResolver::new(MxLookup::Failed(
            "NXDOMAIN".to_string(),
        )));
        assert_eq!(validator.validate("jane@studio.io").await, ValidationVerdict::valid());
    }

    #[tokio::test]
    async fn domain_with_mx_records_is_valid() {
        let validator = EmailValidator::with_resolver(FixedResolver::new(MxLookup::Found(2)));
        assert_eq!(validator.validate("jane@studio.io").await, ValidationVerdict::valid());
    }

    #[tokio::test]
    async fn static_rejections_skip_the_lookup() {
        let resolver = FixedResolver::new(MxLookup::Found(1));
        let validator = EmailValidator::with_resolver(resolver.clone());

        validator.validate("not-an-email").await;
        validator.validate("a@yopmail.com").await;
        assert!(resolver.queried.lock().unwrap().is_empty());
    }
}
