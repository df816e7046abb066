use std::fmt;

use hashbrown::HashSet;
use smallvec::SmallVec;

/// Row identifier: the integer key column of the indexed table.
pub type Rid = i32;

/// Inline capacity for normalization scratch buffers; most part names and
/// pattern literals fit on the stack.
const INLINE: usize = 64;

/// Padding applied to each side of a complete token before windowing.
const PAD: &[u8] = b"  ";

/// A 3-byte trigram drawn from normalized, space-padded token text.
///
/// Byte order is the primary order; the packed form preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Trigram([u8; 3]);

impl Trigram {
    #[inline]
    pub const fn new(b0: u8, b1: u8, b2: u8) -> Self {
        Trigram([b0, b1, b2])
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Trigram(bytes)
    }

    #[inline]
    pub const fn bytes(self) -> [u8; 3] {
        self.0
    }

    /// 24-bit big-endian packing: `(b0 << 16) | (b1 << 8) | b2`.
    ///
    /// Packed order equals lexicographic order over the bytes, which is what
    /// lets the entry tree sort on integers while the ART sorts on bytes.
    #[inline]
    pub const fn packed(self) -> i32 {
        (((self.0[0] as u32) << 16) | ((self.0[1] as u32) << 8) | (self.0[2] as u32)) as i32
    }

    /// Inverse of [`packed`](Self::packed) for values with the top 8 bits clear.
    #[inline]
    pub const fn from_packed(v: i32) -> Self {
        let v = v as u32;
        Trigram([((v >> 16) & 0xFF) as u8, ((v >> 8) & 0xFF) as u8, (v & 0xFF) as u8])
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

/// Normalize text for indexing and matching.
///
/// - ASCII letters are lowercased.
/// - Bytes that are neither ASCII alphanumeric nor whitespace are dropped
///   (this includes all non-ASCII bytes).
/// - Whitespace runs collapse to a single space; the result is trimmed.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for b in text.bytes() {
        if b.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(b.to_ascii_lowercase() as char);
        } else if b.is_ascii_whitespace() {
            pending_space = true;
        }
    }

    out
}

/// Append every length-3 window of a padded token to `out`.
fn push_token_windows(token: &str, pad_left: bool, pad_right: bool, out: &mut Vec<Trigram>) {
    let mut padded: SmallVec<[u8; INLINE]> = SmallVec::with_capacity(token.len() + 4);
    if pad_left {
        padded.extend_from_slice(PAD);
    }
    padded.extend_from_slice(token.as_bytes());
    if pad_right {
        padded.extend_from_slice(PAD);
    }

    for win in padded.windows(3) {
        out.push(Trigram::new(win[0], win[1], win[2]));
    }
}

/// The set of distinct trigrams for one row of text.
///
/// The text is normalized, split into tokens, and each token is padded with
/// two spaces on both sides before windowing, so word-boundary trigrams like
/// `"  a"` and `"c  "` are indexed. Windows never cross token boundaries.
/// Returns a sorted, deduplicated vector; texts with no token yield nothing.
pub fn trigrams_of(text: &str) -> Vec<Trigram> {
    let normalized = normalize(text);

    let mut tris = Vec::new();
    for token in normalized.split(' ') {
        if token.is_empty() {
            continue;
        }
        push_token_windows(token, true, true, &mut tris);
    }

    tris.sort_unstable();
    tris.dedup();
    tris
}

/// Trigrams and literal segments extracted from a `LIKE` pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTrigrams {
    /// Trigrams every matching row must contain, in first-occurrence order.
    pub required: Vec<Trigram>,
    /// Normalized literal segments in pattern order, for the ordered-literal
    /// verification step.
    pub literals: Vec<String>,
}

/// Derive the required trigrams of a pattern of literals and `%` wildcards.
///
/// Literal segments are normalized and tokenized with the same rules as
/// [`trigrams_of`]; a mismatch between the two sides produces false
/// negatives, so both must stay in lockstep. Padding is asymmetric at the
/// segment edges: a segment start adjacent to `%` could continue a longer
/// word, so it is left unpadded, while interior token boundaries are real
/// word boundaries and always get the full two-space pad.
///
/// An empty `required` vector means the pattern carries no usable literal
/// content (`"%%"`, or literals shorter than a window) and cannot be served
/// by the trigram index.
pub fn pattern_trigrams(pattern: &str) -> PatternTrigrams {
    let bytes = pattern.as_bytes();
    let mut out = PatternTrigrams::default();
    let mut seen: HashSet<Trigram> = HashSet::new();
    let mut windows = Vec::new();

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < bytes.len() && bytes[j] != b'%' {
            j += 1;
        }

        let anchored_left = i == 0;
        let anchored_right = j == bytes.len();
        let segment = normalize(&pattern[i..j]);
        i = j;

        if segment.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = segment.split(' ').filter(|t| !t.is_empty()).collect();
        let last = tokens.len() - 1;
        for (k, token) in tokens.iter().enumerate() {
            let pad_left = k > 0 || anchored_left;
            let pad_right = k < last || anchored_right;

            windows.clear();
            push_token_windows(token, pad_left, pad_right, &mut windows);
            for &tri in &windows {
                if seen.insert(tri) {
                    out.required.push(tri);
                }
            }
        }

        out.literals.push(segment);
    }

    out
}

#[cfg(test)]
#[path = "trigram_tests.rs"]
mod tests;
