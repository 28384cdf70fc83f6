use crate::{RESERVED_SUBDOMAINS, TenantSlug};

use log::debug;

/// Maps a request's `Host` to the tenant it addresses.
///
/// `gunes.roomapp.com` with base domain `roomapp.com` resolves to `gunes`.
/// The bare base domain, unrelated hosts and reserved platform subdomains
/// (`www`, `api`, plus any configured extras) resolve to no tenant.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    base_domain: String,
    suffix: String,
    reserved: Vec<String>,
}

impl TenantResolver {
    pub fn new(base_domain: &str) -> Self {
        let base_domain = base_domain.trim().trim_matches('.').to_ascii_lowercase();
        let suffix = format!(".{}", base_domain);

        Self {
            base_domain,
            suffix,
            reserved: RESERVED_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Reserve additional subdomains on top of `www` and `api`.
    pub fn with_reserved<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for label in extra {
            let label = label.as_ref().trim().to_ascii_lowercase();
            if !label.is_empty() && !self.reserved.contains(&label) {
                self.reserved.push(label);
            }
        }
        self
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    pub fn reserved(&self) -> &[String] {
        &self.reserved
    }

    pub fn is_reserved(&self, label: &str) -> bool {
        self.reserved.iter().any(|r| r.eq_ignore_ascii_case(label))
    }

    /// Never fails: anything that is not `<label>.<base_domain>` is "no tenant".
    pub fn resolve(&self, host_header: &str) -> Option<TenantSlug> {
        let host = strip_port(host_header.trim());

        let candidate = strip_suffix_ignore_case(host, &self.suffix)?;

        if candidate.is_empty() || candidate.contains('.') || self.is_reserved(candidate) {
            debug!("Host '{}' carries no tenant", host_header);
            return None;
        }

        let slug = TenantSlug::parse(candidate);
        if slug.is_none() {
            debug!("Host '{}' has an invalid tenant label", host_header);
        }
        slug
    }
}

/// Resolve against the default reserved subdomains.
pub fn resolve_tenant(host_header: &str, base_domain: &str) -> Option<TenantSlug> {
    TenantResolver::new(base_domain).resolve(host_header)
}

/// `host:8080` -> `host`
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

fn strip_suffix_ignore_case<'a>(host: &'a str, suffix: &str) -> Option<&'a str> {
    if host.len() < suffix.len() {
        return None;
    }

    let split = host.len() - suffix.len();
    if !host.is_char_boundary(split) {
        return None;
    }

    let (head, tail) = host.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
