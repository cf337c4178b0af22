//! Deny-lists compiled into the binary.
//!
//! Entries are lowercase; callers lowercase the value under test before comparing.

/// Throwaway-inbox providers. Matched as a suffix of the domain.
pub const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "10minutemail.net",
    "20minutemail.com",
    "33mail.com",
    "burnermail.io",
    "discard.email",
    "dispostable.com",
    "emailondeck.com",
    "fakeinbox.com",
    "getairmail.com",
    "getnada.com",
    "guerrillamail.biz",
    "guerrillamail.com",
    "guerrillamail.de",
    "guerrillamail.info",
    "guerrillamail.net",
    "guerrillamail.org",
    "guerrillamailblock.com",
    "harakirimail.com",
    "inboxkitten.com",
    "maildrop.cc",
    "mailinator.com",
    "mailinator.net",
    "mailnesia.com",
    "mintemail.com",
    "moakt.com",
    "mohmal.com",
    "mytemp.email",
    "sharklasers.com",
    "spam4.me",
    "spamgourmet.com",
    "temp-mail.io",
    "temp-mail.org",
    "tempail.com",
    "tempmail.com",
    "tempmail.net",
    "tempmailo.com",
    "tempr.email",
    "throwawaymail.com",
    "trashmail.com",
    "trashmail.de",
    "trashmail.net",
    "yopmail.com",
    "yopmail.fr",
    "yopmail.net",
];

/// Mailboxes that name a function rather than a person. Matched exactly.
pub const ROLE_ACCOUNTS: &[&str] = &[
    "abuse",
    "admin",
    "administrator",
    "billing",
    "contact",
    "devnull",
    "dns",
    "ftp",
    "help",
    "hostmaster",
    "info",
    "mail",
    "mailer-daemon",
    "marketing",
    "no-reply",
    "noc",
    "noreply",
    "office",
    "postmaster",
    "privacy",
    "root",
    "sales",
    "security",
    "support",
    "sysadmin",
    "team",
    "test",
    "webmaster",
];

/// Misspelled major providers and placeholder domains. Matched exactly.
pub const TYPO_DOMAINS: &[&str] = &[
    // gmail.com
    "gamil.com",
    "gmai.com",
    "gmail.co",
    "gmail.con",
    "gmaill.com",
    "gmal.com",
    "gmial.com",
    "gnail.com",
    // yahoo.com
    "yaho.com",
    "yahoo.co",
    "yahoo.con",
    "yahooo.com",
    "yhaoo.com",
    // hotmail.com
    "hotmai.com",
    "hotmail.co",
    "hotmail.con",
    "hotmal.com",
    "hotmial.com",
    "hotnail.com",
    // outlook.com
    "outlok.com",
    "outlook.co",
    "outlook.con",
    "outloook.com",
    // icloud.com
    "iclod.com",
    "icloud.co",
    "icloud.con",
    "icould.com",
    // placeholders
    "domain.com",
    "example.com",
    "test.com",
];
