use std::iter::Peekable;
use std::str::Chars;

/// Number of characters kept when an excerpt is derived from a body.
pub const EXCERPT_CHARS: usize = 150;

/// Suffix appended to every derived excerpt.
pub const ELLIPSIS: &str = "...";

/// Remove markup tags from `html`, keeping the text between them.
///
/// A `<` only opens a tag when followed by a letter, `/`, `!` or `?`, so
/// prose like `a < b` survives. Quoted attribute values may contain `>`.
/// Entities are left as they are.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }

        let opens_tag = chars
            .peek()
            .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?'));
        if !opens_tag {
            out.push(c);
            continue;
        }

        if starts_comment(&chars) {
            skip_comment(&mut chars);
            continue;
        }

        let mut quote: Option<char> = None;
        for inner in chars.by_ref() {
            match (quote, inner) {
                (None, '"' | '\'') => quote = Some(inner),
                (Some(q), _) if inner == q => quote = None,
                (None, '>') => break,
                _ => {}
            }
        }
    }

    out
}

fn starts_comment(chars: &Peekable<Chars<'_>>) -> bool {
    let mut ahead = chars.clone();
    ahead.next() == Some('!') && ahead.next() == Some('-') && ahead.next() == Some('-')
}

/// Consume a comment whose `<` was already read.
fn skip_comment(chars: &mut Peekable<Chars<'_>>) {
    // "!--"
    chars.nth(2);
    let mut dashes = 0;
    for c in chars.by_ref() {
        match c {
            '-' => dashes += 1,
            '>' if dashes >= 2 => return,
            _ => dashes = 0,
        }
    }
}

/// First `max_chars` characters of the tag-stripped `html`, followed by `...`.
///
/// The ellipsis is appended even when nothing was cut.
pub fn excerpt(html: &str, max_chars: usize) -> String {
    let mut text: String = strip_tags(html).chars().take(max_chars).collect();
    text.push_str(ELLIPSIS);
    text
}
