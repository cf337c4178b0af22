//! MX record lookups

use async_trait::async_trait;

/// Result of looking up the mail exchangers of a domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MxLookup {
    /// The domain publishes this many MX records
    Found(usize),
    /// The domain exists but publishes no MX records
    NoRecords,
    /// The lookup could not be completed (timeout, NXDOMAIN, resolver failure)
    Failed(String),
}

#[async_trait]
pub trait MxResolver: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> MxLookup;
}

#[cfg(feature = "dns")]
pub use dns::DnsMxResolver;

#[cfg(feature = "dns")]
mod dns {
    use super::{MxLookup, MxResolver};
    use async_trait::async_trait;
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};
    use hickory_resolver::error::{ResolveError, ResolveErrorKind};
    use hickory_resolver::lookup::MxLookup as HickoryMxLookup;
    use hickory_resolver::proto::op::ResponseCode;
    use hickory_resolver::TokioAsyncResolver;
    use std::time::Duration;

    /// MX resolver backed by hickory-resolver
    #[derive(Clone)]
    pub struct DnsMxResolver {
        resolver: TokioAsyncResolver,
        timeout: Duration,
    }

    impl DnsMxResolver {
        /// Build a resolver from the system configuration (`/etc/resolv.conf`),
        /// falling back to public resolvers when it cannot be read.
        pub fn from_system_conf(timeout: Duration) -> Self {
            let (config, opts) = match hickory_resolver::system_conf::read_system_conf() {
                Ok(conf) => conf,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not read system DNS configuration, using defaults");
                    (ResolverConfig::default(), ResolverOpts::default())
                }
            };
            Self::new(config, opts, timeout)
        }

        pub fn new(config: ResolverConfig, opts: ResolverOpts, timeout: Duration) -> Self {
            Self {
                resolver: TokioAsyncResolver::tokio(config, lookup_options(opts, timeout)),
                timeout,
            }
        }
    }

    /// One attempt per lookup, bounded by the validator's timeout
    fn lookup_options(mut opts: ResolverOpts, timeout: Duration) -> ResolverOpts {
        opts.timeout = timeout;
        opts.attempts = 1;
        opts
    }

    #[async_trait]
    impl MxResolver for DnsMxResolver {
        #[tracing::instrument(skip(self), fields(dns.record_type = "MX"))]
        async fn lookup_mx(&self, domain: &str) -> MxLookup {
            // Trailing dot keeps search domains from being appended
            let fqdn = format!("{}.", domain.trim_end_matches('.'));

            match tokio::time::timeout(self.timeout, self.resolver.mx_lookup(fqdn)).await {
                Ok(result) => classify(result),
                Err(_) => MxLookup::Failed(format!(
                    "MX lookup timed out after {} ms",
                    self.timeout.as_millis()
                )),
            }
        }
    }

    pub(super) fn classify(result: Result<HickoryMxLookup, ResolveError>) -> MxLookup {
        match result {
            Ok(lookup) => match lookup.iter().count() {
                0 => MxLookup::NoRecords,
                n => MxLookup::Found(n),
            },
            Err(e) => match e.kind() {
                ResolveErrorKind::NoRecordsFound {
                    response_code: ResponseCode::NoError,
                    ..
                } => MxLookup::NoRecords,
                _ => MxLookup::Failed(e.to_string()),
            },
        }
    }

}
