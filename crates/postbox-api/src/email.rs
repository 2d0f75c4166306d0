use email_address::{EmailAddress, Options};

/// How a provider marks sub-addresses in the local part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRule {
    /// Keep everything before the first separator (`ann+news` → `ann`).
    CutAtFirst(char),
    /// Drop the segment after the last separator (`ann-b-news` → `ann-b`).
    CutAtLast(char),
}

/// Aliasing rules for one mail provider.
#[derive(Debug, Clone)]
pub struct ProviderRule {
    pub domains: Vec<String>,
    /// Domain every alias in `domains` is rewritten to, if any.
    pub canonical_domain: Option<String>,
    /// The provider ignores dots in the local part.
    pub strip_dots: bool,
    pub tag: Option<TagRule>,
}

impl ProviderRule {
    fn new(domains: &[&str]) -> Self {
        Self {
            domains: domains.iter().map(|d| d.to_string()).collect(),
            canonical_domain: None,
            strip_dots: false,
            tag: None,
        }
    }

    fn canonical(mut self, domain: &str) -> Self {
        self.canonical_domain = Some(domain.to_string());
        self
    }

    fn strip_dots(mut self) -> Self {
        self.strip_dots = true;
        self
    }

    fn tag(mut self, rule: TagRule) -> Self {
        self.tag = Some(rule);
        self
    }

    fn matches(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }
}

/// Canonicalization policy applied to every valid address.
///
/// The domain is always lowercased. Everything else is policy: the default
/// folds the local part to lowercase and applies the aliasing rules of the
/// large webmail providers; `domain_only` touches nothing but the domain.
#[derive(Debug, Clone)]
pub struct EmailPolicy {
    pub lowercase_local: bool,
    pub provider_rules: Vec<ProviderRule>,
}

impl Default for EmailPolicy {
    fn default() -> Self {
        Self {
            lowercase_local: true,
            provider_rules: vec![
                ProviderRule::new(&["gmail.com", "googlemail.com"])
                    .canonical("gmail.com")
                    .strip_dots()
                    .tag(TagRule::CutAtFirst('+')),
                ProviderRule::new(&[
                    "hotmail.at", "hotmail.be", "hotmail.ca", "hotmail.cl", "hotmail.co.il",
                    "hotmail.co.nz", "hotmail.co.th", "hotmail.co.uk", "hotmail.com",
                    "hotmail.com.ar", "hotmail.com.mx", "hotmail.de", "hotmail.es", "hotmail.fr",
                    "hotmail.it", "hotmail.se", "live.co.uk", "live.com", "live.com.ar",
                    "live.com.mx", "live.de", "live.fr", "live.it", "live.nl", "msn.com",
                    "outlook.at", "outlook.com", "outlook.de", "outlook.es", "outlook.fr",
                    "outlook.ie", "outlook.it", "passport.com",
                ])
                .tag(TagRule::CutAtFirst('+')),
                ProviderRule::new(&[
                    "rocketmail.com", "yahoo.ca", "yahoo.co.uk", "yahoo.com", "yahoo.de",
                    "yahoo.fr", "yahoo.in", "yahoo.it", "ymail.com",
                ])
                .tag(TagRule::CutAtLast('-')),
                ProviderRule::new(&["icloud.com", "me.com"]).tag(TagRule::CutAtFirst('+')),
                ProviderRule::new(&["yandex.ru", "yandex.ua", "yandex.kz", "yandex.com", "yandex.by", "ya.ru"])
                    .canonical("yandex.ru"),
            ],
        }
    }
}

impl EmailPolicy {
    pub fn domain_only() -> Self {
        Self {
            lowercase_local: false,
            provider_rules: Vec::new(),
        }
    }

    /// Check `input` against the address grammar and return its canonical
    /// form. `None` means the address is invalid, or that nothing is left of
    /// the local part once aliasing is removed.
    pub fn normalize(&self, input: &str) -> Option<String> {
        let parsed = parse(input)?;
        let domain = parsed.domain().to_lowercase();
        let mut local = parsed.local_part().to_string();

        let rule = self.provider_rules.iter().find(|r| r.matches(&domain));
        let domain = match rule {
            Some(rule) => {
                local = apply_rule(rule, &local);
                rule.canonical_domain.clone().unwrap_or(domain)
            }
            None => domain,
        };

        if self.lowercase_local {
            local = local.to_lowercase();
        }
        if local.is_empty() {
            return None;
        }

        Some(format!("{}@{}", local, domain))
    }
}

fn apply_rule(rule: &ProviderRule, local: &str) -> String {
    let mut local = match rule.tag {
        Some(TagRule::CutAtFirst(sep)) => local.split(sep).next().unwrap_or_default().to_string(),
        Some(TagRule::CutAtLast(sep)) => match local.rsplit_once(sep) {
            Some((head, _)) => head.to_string(),
            None => local.to_string(),
        },
        None => local.to_string(),
    };
    if rule.strip_dots {
        local.retain(|c| c != '.');
    }
    local
}

/// Parse a bare `local@domain` address: no display name, no domain literal,
/// and the domain must end in a plausible top-level label.
fn parse(input: &str) -> Option<EmailAddress> {
    let options = Options::default()
        .with_required_tld()
        .without_domain_literal()
        .without_display_text();
    let parsed = EmailAddress::parse_with_options(input, options).ok()?;

    let tld = parsed.domain().rsplit('.').next().unwrap_or_default();
    let plausible_tld = (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
        || tld.to_ascii_lowercase().starts_with("xn--");
    plausible_tld.then_some(parsed)
}

#[cfg(test)]
fn is_valid(input: &str) -> bool {
    parse(input).is_some()
}
