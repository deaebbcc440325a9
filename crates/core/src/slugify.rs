use std::collections::HashSet;

/// Unicode-preserving heading slug, unique within `used_slugs`.
///
/// - ASCII letters are lowercased, digits kept.
/// - Other alphanumerics keep their script and are lowercased where possible
///   (`"Café"` → `"café"`).
/// - CJK characters are kept verbatim and whitespace between two of them is
///   dropped (`"日本語 の 見出し"` → `"日本語の見出し"`).
/// - Whitespace, `-`, `_`, `.` and `/` collapse into a single `-`; leading and
///   trailing separators are trimmed. Everything else is removed.
/// - An empty result becomes `"section"`.
///
/// Repeats get `-1`, `-2`, ... appended, skipping any candidate already taken,
/// so a natural `"test-1"` and a deduplicated `"test"` never collide.
pub fn slugify(text: &str, used_slugs: &mut HashSet<String>) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_hyphen = false;
    let mut prev_was_cjk = false;

    for ch in text.chars() {
        if is_cjk(ch) {
            if prev_was_cjk && last_hyphen {
                slug.pop();
            }
            slug.push(ch);
            last_hyphen = false;
            prev_was_cjk = true;
            continue;
        }

        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_hyphen = false;
            prev_was_cjk = false;
            continue;
        }

        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_hyphen = false;
            prev_was_cjk = false;
            continue;
        }

        if ch.is_whitespace() || matches!(ch, '-' | '_' | '.' | '/') {
            if !slug.is_empty() && !last_hyphen {
                slug.push('-');
                last_hyphen = true;
            }
            continue;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        slug.push_str("section");
    }

    let mut candidate = slug.clone();
    let mut n = 1;
    while used_slugs.contains(&candidate) {
        candidate = format!("{slug}-{n}");
        n += 1;
    }

    used_slugs.insert(candidate.clone());
    candidate
}

/// CJK ideographs, kana, hangul, and full-width forms.
pub fn is_cjk(ch: char) -> bool {
    matches!(
        ch as u32,
        0x3040..=0x30FF      // hiragana, katakana
            | 0x3400..=0x4DBF // CJK extension A
            | 0x4E00..=0x9FFF // CJK unified ideographs
            | 0xAC00..=0xD7AF // hangul syllables
            | 0x1100..=0x11FF // hangul jamo
            | 0x3130..=0x318F // hangul compatibility jamo
            | 0xF900..=0xFAFF // CJK compatibility ideographs
            | 0xFF00..=0xFFEF // half-width and full-width forms
            | 0x20000..=0x2FA1F
    )
}
