//! Left/right naming conventions for deformation targets.
//!
//! Recognized token forms, in priority order:
//! 1. suffix with separator: `Brow.L`, `Smile_r`, `Jaw-Left` (case-insensitive)
//! 2. prefix with separator: `L_Brow`, `right.Smile` (case-insensitive)
//! 3. bare suffix: `BrowL`, `SmileLeft` (case-sensitive, so a lowercase `Curl`
//!    stays an ordinary word while a trailing uppercase `L`/`R` is a token)
//!
//! Detection is unambiguous by construction: if more than one form matches and
//! they disagree on the side, the name is reported [`NameSide::Ambiguous`] and
//! never silently resolved.

use crate::classify::Side;

/// Side information decidable from an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSide {
    /// The name carries a left token.
    Left,
    /// The name carries a right token.
    Right,
    /// No side token found.
    Unsided,
    /// Conflicting side tokens found; no decidable side.
    Ambiguous,
}

impl NameSide {
    /// The geometric side, when one is decidable.
    pub const fn side(&self) -> Option<Side> {
        match self {
            NameSide::Left => Some(Side::Left),
            NameSide::Right => Some(Side::Right),
            NameSide::Unsided | NameSide::Ambiguous => None,
        }
    }
}

const SEPARATORS: [char; 3] = ['.', '_', '-'];

/// A located side token within a name.
#[derive(Debug, Clone, Copy)]
struct TokenMatch {
    side: Side,
    /// Byte range of the token text (separator excluded).
    start: usize,
    end: usize,
}

fn token_side(token: &str) -> Option<Side> {
    match token.to_ascii_lowercase().as_str() {
        "l" | "left" => Some(Side::Left),
        "r" | "right" => Some(Side::Right),
        _ => None,
    }
}

/// Longest separator-suffix token match, e.g. `Brow.L` or `Smile_right`.
fn match_separated_suffix(name: &str) -> Option<TokenMatch> {
    // Longer tokens first so `Brow_Left` doesn't read as bare-`t` nonsense.
    for token_len in [5usize, 4, 1] {
        if name.len() < token_len + 1 || !name.is_char_boundary(name.len() - token_len) {
            continue;
        }
        let start = name.len() - token_len;
        let sep = name[..start].chars().next_back()?;
        if !SEPARATORS.contains(&sep) {
            continue;
        }
        if let Some(side) = token_side(&name[start..]) {
            return Some(TokenMatch {
                side,
                start,
                end: name.len(),
            });
        }
    }
    None
}

/// Separator-prefix token match, e.g. `L_Brow` or `right.Smile`.
fn match_separated_prefix(name: &str) -> Option<TokenMatch> {
    for token_len in [5usize, 4, 1] {
        if name.len() < token_len + 1 || !name.is_char_boundary(token_len) {
            continue;
        }
        let sep = name[token_len..].chars().next()?;
        if !SEPARATORS.contains(&sep) {
            continue;
        }
        if let Some(side) = token_side(&name[..token_len]) {
            return Some(TokenMatch {
                side,
                start: 0,
                end: token_len,
            });
        }
    }
    None
}

/// Bare suffix match, case-sensitive: `BrowL`, `BrowR`, `SmileLeft`,
/// `SmileRight`. The character before the token must be alphanumeric, so
/// separator forms are not double-counted.
fn match_bare_suffix(name: &str) -> Option<TokenMatch> {
    for (token, side) in [
        ("Left", Side::Left),
        ("Right", Side::Right),
        ("L", Side::Left),
        ("R", Side::Right),
    ] {
        if let Some(base) = name.strip_suffix(token) {
            let Some(prev) = base.chars().next_back() else {
                continue;
            };
            if prev.is_ascii_alphanumeric() {
                return Some(TokenMatch {
                    side,
                    start: base.len(),
                    end: name.len(),
                });
            }
        }
    }
    None
}

fn find_matches(name: &str) -> Vec<TokenMatch> {
    [
        match_separated_suffix(name),
        match_separated_prefix(name),
        match_bare_suffix(name),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Detect the side encoded in `name`, if any.
pub fn detect_side(name: &str) -> NameSide {
    let matches = find_matches(name);
    let Some(first) = matches.first() else {
        return NameSide::Unsided;
    };
    if matches.iter().any(|m| m.side != first.side) {
        return NameSide::Ambiguous;
    }
    match first.side {
        Side::Left => NameSide::Left,
        Side::Right => NameSide::Right,
    }
}

/// Flip a recognized token to its opposite, preserving its case style.
fn flip_token(token: &str) -> String {
    let flipped = match token.to_ascii_lowercase().as_str() {
        "l" => "r",
        "r" => "l",
        "left" => "right",
        "right" => "left",
        _ => return token.to_string(),
    };
    if token.chars().all(|c| c.is_ascii_uppercase()) {
        flipped.to_ascii_uppercase()
    } else if token.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        let mut out = String::with_capacity(flipped.len());
        let mut chars = flipped.chars();
        if let Some(c) = chars.next() {
            out.push(c.to_ascii_uppercase());
        }
        out.extend(chars);
        out
    } else {
        flipped.to_string()
    }
}

/// Replace the matched side token with its opposite-side equivalent,
/// preserving the original token's case style and separator.
///
/// Returns the input unchanged when no side is decidable; callers that need a
/// distinct destination name must treat that as a failure condition.
pub fn mirror_name(name: &str) -> String {
    if detect_side(name).side().is_none() {
        return name.to_string();
    }
    let matches = find_matches(name);
    // Priority order is the order find_matches emits.
    let Some(m) = matches.first() else {
        return name.to_string();
    };
    let mut out = String::with_capacity(name.len());
    out.push_str(&name[..m.start]);
    out.push_str(&flip_token(&name[m.start..m.end]));
    out.push_str(&name[m.end..]);
    out
}

/// Disambiguate `candidate` against names already taken: first try the name
/// itself, then `{name}_Mirror`, then `{name}_Mirror_1`, `_2`, …
pub fn unique_name(candidate: &str, exists: impl Fn(&str) -> bool) -> String {
    if !exists(candidate) {
        return candidate.to_string();
    }
    let fallback = format!("{candidate}_Mirror");
    if !exists(&fallback) {
        return fallback;
    }
    let mut i = 1usize;
    loop {
        let numbered = format!("{fallback}_{i}");
        if !exists(&numbered) {
            return numbered;
        }
        i += 1;
    }
}
