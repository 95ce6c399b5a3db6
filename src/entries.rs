// Entries - the identifiers listed in the TUI
//
// An entry is a chain identifier (account, contract, transaction hash, ...)
// with an optional human name. The kind is detected from the value's shape
// and decides which confirmation label a copy shows.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthChar;

/// What kind of identifier a value is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Account,
    MuxedAccount,
    Contract,
    Transaction,
    Ledger,
    Asset,
    Other,
}

struct Patterns {
    account: Regex,
    muxed: Regex,
    contract: Regex,
    tx_hash: Regex,
    ledger: Regex,
    asset: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        account: Regex::new(r"^G[A-Z2-7]{55}$").unwrap(),
        muxed: Regex::new(r"^M[A-Z2-7]{68}$").unwrap(),
        contract: Regex::new(r"^C[A-Z2-7]{55}$").unwrap(),
        tx_hash: Regex::new(r"^[0-9a-fA-F]{64}$").unwrap(),
        ledger: Regex::new(r"^[0-9]+$").unwrap(),
        asset: Regex::new(r"^[A-Za-z0-9]{1,12}:G[A-Z2-7]{55}$").unwrap(),
    })
}

impl EntryKind {
    /// Classify a value by its shape
    pub fn detect(value: &str) -> Self {
        let value = value.trim();
        let p = patterns();

        if p.account.is_match(value) {
            Self::Account
        } else if p.muxed.is_match(value) {
            Self::MuxedAccount
        } else if p.contract.is_match(value) {
            Self::Contract
        } else if p.tx_hash.is_match(value) {
            Self::Transaction
        } else if p.ledger.is_match(value) {
            Self::Ledger
        } else if value.eq_ignore_ascii_case("native") || p.asset.is_match(value) {
            Self::Asset
        } else {
            Self::Other
        }
    }

    /// Confirmation shown after copying this kind; `None` uses the default label
    pub fn copy_label(&self) -> Option<&'static str> {
        match self {
            Self::Account | Self::MuxedAccount => Some("Address copied"),
            Self::Contract => Some("Contract ID copied"),
            Self::Transaction => Some("Transaction hash copied"),
            Self::Ledger => Some("Ledger number copied"),
            Self::Asset => Some("Asset copied"),
            Self::Other => None,
        }
    }

    /// Short tag for the list column
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::MuxedAccount => "muxed",
            Self::Contract => "contract",
            Self::Transaction => "tx",
            Self::Ledger => "ledger",
            Self::Asset => "asset",
            Self::Other => "text",
        }
    }
}

/// A copyable identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: Option<String>,
    pub value: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(name: Option<String>, value: impl Into<String>) -> Self {
        let value: String = value.into();
        let value = value.trim().to_string();
        let kind = EntryKind::detect(&value);
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            value,
            kind,
        }
    }

    /// Parse a command-line argument: `name=value` or a bare `value`
    pub fn parse(arg: &str) -> Self {
        match arg.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
                Self::new(Some(name.trim().to_string()), value)
            }
            _ => Self::new(None, arg),
        }
    }

    /// Name if set, otherwise the shortened value
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => shorten(&self.value, 6, 6),
        }
    }
}

/// Shorten a long identifier to `head...tail` (e.g. `GABCDE...VWXYZ1`)
///
/// `head` and `tail` are display columns. Values that already fit in
/// `head + tail + 3` columns are returned unchanged.
pub fn shorten(value: &str, head: usize, tail: usize) -> String {
    let width: usize = value.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= head + tail + 3 {
        return value.to_string();
    }

    let mut front = String::new();
    let mut used = 0;
    for c in value.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > head {
            break;
        }
        used += w;
        front.push(c);
    }

    let mut back: Vec<char> = Vec::new();
    used = 0;
    for c in value.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > tail {
            break;
        }
        used += w;
        back.push(c);
    }
    back.reverse();

    format!("{}...{}", front, back.into_iter().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "GAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7";
    const CONTRACT: &str = "CAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7";
    const TX: &str = "3389e9f0f1a65f19736cacf544c2e825313e8447f569233bb8db39aa607c8889";

    #[test]
    fn test_detect_kinds() {
        assert_eq!(EntryKind::detect(ACCOUNT), EntryKind::Account);
        assert_eq!(EntryKind::detect(CONTRACT), EntryKind::Contract);
        assert_eq!(EntryKind::detect(TX), EntryKind::Transaction);
        assert_eq!(EntryKind::detect("51234567"), EntryKind::Ledger);
        assert_eq!(EntryKind::detect("native"), EntryKind::Asset);
        assert_eq!(
            EntryKind::detect(&format!("USDC:{}", ACCOUNT)),
            EntryKind::Asset
        );
        assert_eq!(EntryKind::detect("hello world"), EntryKind::Other);
        assert_eq!(EntryKind::detect(""), EntryKind::Other);
    }

    #[test]
    fn test_detect_muxed_account() {
        let muxed = format!("M{}", "A".repeat(68));
        assert_eq!(EntryKind::detect(&muxed), EntryKind::MuxedAccount);
    }

    #[test]
    fn test_detect_rejects_lowercase_strkey() {
        assert_eq!(
            EntryKind::detect(&ACCOUNT.to_lowercase()),
            EntryKind::Other
        );
    }

    #[test]
    fn test_copy_labels() {
        assert_eq!(EntryKind::Account.copy_label(), Some("Address copied"));
        assert_eq!(EntryKind::MuxedAccount.copy_label(), Some("Address copied"));
        assert_eq!(EntryKind::Other.copy_label(), None);
    }

    #[test]
    fn test_parse_named_and_bare() {
        let named = Entry::parse(&format!("treasury={}", ACCOUNT));
        assert_eq!(named.name.as_deref(), Some("treasury"));
        assert_eq!(named.value, ACCOUNT);
        assert_eq!(named.kind, EntryKind::Account);

        let bare = Entry::parse(TX);
        assert_eq!(bare.name, None);
        assert_eq!(bare.kind, EntryKind::Transaction);

        // Trailing '=' keeps the whole argument as the value
        let odd = Entry::parse("abc=");
        assert_eq!(odd.name, None);
        assert_eq!(odd.value, "abc=");
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten(ACCOUNT, 4, 4), "GAAZ...CWN7");
        assert_eq!(shorten("short", 4, 4), "short");
        assert_eq!(shorten("exactly11ch", 4, 4), "exactly11ch");
        assert_eq!(shorten("", 4, 4), "");
    }

    #[test]
    fn test_shorten_counts_wide_chars() {
        // Each CJK char is two columns wide
        assert_eq!(shorten("日本語のテキスト", 4, 4), "日本...スト");
    }

    #[test]
    fn test_display_name_prefers_name() {
        let entry = Entry::new(Some("hot wallet".to_string()), ACCOUNT);
        assert_eq!(entry.display_name(), "hot wallet");
        let entry = Entry::new(Some("  ".to_string()), ACCOUNT);
        assert_eq!(entry.display_name(), "GAAZI4...OCCWN7");
    }
}
