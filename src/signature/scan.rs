//! Depth-counted character scanning over page source.
//!
//! Every routine here is quote-aware (`'`, `"` and backtick strings with
//! backslash escapes) and only inspects ASCII delimiters, so byte offsets
//! returned are always valid `str` boundaries.

/// Replace `//` and `/* */` comments outside strings with spaces.
///
/// Newlines inside block comments are kept so offsets and line structure
/// stay intact.
pub fn blank_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if let Some(q) = quote {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == q || (b == b'\n' && q != b'`') {
                quote = None;
            }
            i += 1;
            continue;
        }

        match (b, bytes.get(i + 1)) {
            (b'/', Some(b'/')) => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out.push(b' ');
                    i += 1;
                }
            }
            (b'/', Some(b'*')) => {
                out.extend_from_slice(b"  ");
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    out.push(if bytes[i] == b'\n' { b'\n' } else { b' ' });
                    i += 1;
                }
                if i < bytes.len() {
                    out.extend_from_slice(b"  ");
                    i += 2;
                }
            }
            _ => {
                if matches!(b, b'\'' | b'"' | b'`') {
                    quote = Some(b);
                }
                out.push(b);
                i += 1;
            }
        }
    }

    // Only ASCII bytes were replaced, and only with ASCII, so this cannot fail.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn closer_for(open: u8) -> Option<u8> {
    match open {
        b'{' => Some(b'}'),
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'<' => Some(b'>'),
        _ => None,
    }
}

fn is_arrow(bytes: &[u8], i: usize) -> bool {
    i > 0 && bytes[i - 1] == b'='
}

/// Iterator over bytes outside string literals.
///
/// Yields `(offset, byte, depth)` where `depth` is the nesting level in
/// effect before the byte. `'` and `"` strings end at a newline so a stray
/// apostrophe in JSX text cannot swallow the rest of the file.
struct Walker<'a> {
    bytes: &'a [u8],
    pos: usize,
    quote: Option<u8>,
    depth: usize,
    angles: bool,
}

impl<'a> Walker<'a> {
    fn new(text: &'a str, start: usize, angles: bool) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: start,
            quote: None,
            depth: 0,
            angles,
        }
    }
}

impl Iterator for Walker<'_> {
    type Item = (usize, u8, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            let i = self.pos;
            let b = self.bytes[i];
            self.pos += 1;

            if let Some(q) = self.quote {
                if b == b'\\' {
                    self.pos += 1;
                } else if b == q || (b == b'\n' && q != b'`') {
                    self.quote = None;
                }
                continue;
            }

            let depth = self.depth;
            match b {
                b'\'' | b'"' | b'`' => self.quote = Some(b),
                b'{' | b'(' | b'[' => self.depth += 1,
                b'}' | b')' | b']' => self.depth = self.depth.saturating_sub(1),
                b'<' if self.angles => self.depth += 1,
                b'>' if self.angles && !is_arrow(self.bytes, i) => {
                    self.depth = self.depth.saturating_sub(1)
                }
                _ => {}
            }
            return Some((i, b, depth));
        }
        None
    }
}

/// Index of the delimiter closing the one at `open`.
///
/// Angle brackets are only tracked when `open` itself is `<`; inside value
/// expressions `<` and `>` are comparison operators.
pub fn find_matching(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let first = closer_for(*bytes.get(open)?)?;
    let angles = first == b'>';
    let mut stack = vec![first];

    for (i, b, _) in Walker::new(text, open + 1, false) {
        match b {
            b'{' | b'(' | b'[' => stack.push(closer_for(b)?),
            b'<' if angles => stack.push(b'>'),
            b'>' if angles => {
                if !is_arrow(bytes, i) && stack.last() == Some(&b'>') {
                    stack.pop();
                }
            }
            b'}' | b')' | b']' => {
                if stack.last() != Some(&b) {
                    return None;
                }
                stack.pop();
            }
            _ => {}
        }

        if stack.is_empty() {
            return Some(i);
        }
    }

    None
}

/// Split on any of `separators` occurring outside strings and nesting.
///
/// Empty (whitespace-only) pieces are dropped.
pub fn split_top_level<'a>(text: &'a str, separators: &[u8], angles: bool) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (i, b, depth) in Walker::new(text, 0, angles) {
        if depth == 0 && separators.contains(&b) {
            pieces.push(&text[start..i]);
            start = i + 1;
        }
    }
    pieces.push(&text[start.min(text.len())..]);

    pieces.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

/// Byte offset of the first top-level occurrence of `needle`.
pub fn find_top_level(text: &str, needle: u8, angles: bool) -> Option<usize> {
    Walker::new(text, 0, angles)
        .find(|&(_, b, depth)| depth == 0 && b == needle)
        .map(|(i, _, _)| i)
}

/// Split `value as Type` at the first top-level `as` keyword.
pub fn split_type_assertion(value: &str) -> (&str, Option<&str>) {
    let bytes = value.as_bytes();
    let is_space = |i: usize| bytes.get(i).is_some_and(|c| c.is_ascii_whitespace());

    let keyword = Walker::new(value, 0, false).find(|&(i, b, depth)| {
        depth == 0
            && b == b'a'
            && bytes.get(i + 1) == Some(&b's')
            && i > 0
            && is_space(i - 1)
            && is_space(i + 2)
    });

    match keyword {
        Some((i, _, _)) => (value[..i].trim(), Some(value[i + 2..].trim())),
        None => (value.trim(), None),
    }
}

/// Collapse whitespace outside strings and drop a leading union/intersection bar.
pub fn normalize_type_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;
    let mut escaped = false;

    for c in text.trim().chars() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        if matches!(c, '\'' | '"' | '`') {
            quote = Some(c);
        }
        out.push(c);
    }

    let trimmed = out.trim_end_matches([',', ';']).trim_end();
    let trimmed = trimmed
        .strip_prefix('|')
        .or_else(|| trimmed.strip_prefix('&'))
        .unwrap_or(trimmed);
    trimmed.trim().to_string()
}

/// Re-join pieces that continue the previous entry instead of starting one.
///
/// Splitting on newlines breaks multi-line unions such as
/// `sort:\n | 'name'\n | 'date'`; a piece that does not begin with a
/// `key:` is appended to the piece before it.
pub fn merge_continuations<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for piece in pieces {
        let piece = piece.trim();
        match merged.last_mut() {
            Some(last) if !starts_with_key(piece) => {
                last.push(' ');
                last.push_str(piece);
            }
            _ => merged.push(piece.to_string()),
        }
    }
    merged
}

/// Whether `piece` begins with `name:`, `name?:`, `'name':` or `readonly name:`.
pub fn starts_with_key(piece: &str) -> bool {
    match find_top_level(piece, b':', true) {
        Some(colon) => parse_key(&piece[..colon]).is_some(),
        None => is_plain_identifier(piece.trim()),
    }
}

/// Normalize the key side of a member: strips `readonly`, `?` and quotes.
pub fn parse_key(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("readonly ").map(str::trim).unwrap_or(raw);
    let raw = raw.strip_suffix('?').map(str::trim_end).unwrap_or(raw);

    for q in ['\'', '"'] {
        if let Some(inner) = raw.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return (!inner.is_empty()).then(|| inner.to_string());
        }
    }

    is_plain_identifier(raw).then(|| raw.to_string())
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
