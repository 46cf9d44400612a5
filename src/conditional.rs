//! Conditional expander: `if(COND) then A else B` to piecewise `{COND: A, B}`.
//!
//! Conditionals are found with a recursive-descent scan over balanced
//! delimiters. A branch is either a complete nested conditional or plain text
//! running up to the next top-level `else`, comma or unmatched closing
//! bracket. Branches are expanded before the conditional that contains them,
//! and whole passes repeat until nothing changes, so conditionals next to each
//! other on a line are all rewritten.
//!
//! Conditions may join two comparisons with `and` or `or`:
//!
//! ```text
//! if(a and b) then T else F   ->  {a: {b: T, F}, F}
//! if(a or b) then T else F    ->  {a: T, {b: T, F}}
//! ```
//!
//! Only the first `and` (tried first) or `or` is split on.

/// Rewrite every conditional in `line` into piecewise form.
pub fn expand(line: &str) -> String {
    let mut current = line.to_string();
    while let Some(next) = rewrite_pass(&current) {
        current = next;
    }
    current
}

/// Rewrite the conditionals found in one left-to-right scan, or `None` if
/// there were none.
fn rewrite_pass(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut changed = false;
    let mut i = 0;
    while i < text.len() {
        if is_keyword_at(text, i, "if") {
            if let Some((end, compiled)) = parse_conditional(text, i) {
                let (start, end) = unwrap_parens(text, i, end);
                out.push_str(&text[copied..start]);
                out.push_str(&compiled);
                copied = end;
                changed = true;
                i = end;
                continue;
            }
        }
        i += 1;
    }
    if !changed {
        return None;
    }
    out.push_str(&text[copied..]);
    Some(out)
}

/// Parse the conditional whose `if` starts at `at`. Returns the end of the
/// construct and its piecewise form.
fn parse_conditional(text: &str, at: usize) -> Option<(usize, String)> {
    let open = skip_ws(text, at + "if".len());
    if text.as_bytes().get(open) != Some(&b'(') {
        return None;
    }
    let close = matching_close(text, open)?;
    let cond = text[open + 1..close].trim();
    if cond.is_empty() {
        return None;
    }

    let then = skip_ws(text, close + 1);
    if !is_keyword_at(text, then, "then") {
        return None;
    }
    let (mut end, truthy) = parse_branch(text, then + "then".len())?;

    let mut falsy = None;
    let otherwise = skip_ws(text, end);
    if is_keyword_at(text, otherwise, "else") {
        let (false_end, branch) = parse_branch(text, otherwise + "else".len())?;
        end = false_end;
        falsy = Some(branch);
    }

    let compiled = compile_condition(&expand(cond), &truthy, falsy.as_deref());
    Some((end, compiled))
}

fn parse_branch(text: &str, from: usize) -> Option<(usize, String)> {
    let start = skip_ws(text, from);
    if is_keyword_at(text, start, "if") {
        if let Some(nested) = parse_conditional(text, start) {
            return Some(nested);
        }
    }
    let end = branch_end(text, start);
    let branch = text[start..end].trim();
    if branch.is_empty() {
        return None;
    }
    Some((end, expand(branch)))
}

/// End of a plain-text branch: the first top-level `else`, comma or
/// unmatched closing bracket.
fn branch_end(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for i in start..bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                if depth == 0 {
                    return i;
                }
                depth -= 1;
            }
            b',' if depth == 0 => return i,
            _ if depth == 0 && is_keyword_at(text, i, "else") => return i,
            _ => {}
        }
    }
    bytes.len()
}

/// Widen `start..end` over a grouping `( ... )` that holds nothing but the
/// conditional. A `(` directly after an identifier is a call and is kept.
fn unwrap_parens(text: &str, start: usize, end: usize) -> (usize, usize) {
    let bytes = text.as_bytes();
    let before = text[..start].trim_end();
    let after = skip_ws(text, end);
    if before.ends_with('(') && bytes.get(after) == Some(&b')') {
        let open = before.len() - 1;
        let is_call = open > 0 && is_ident_byte(bytes[open - 1]);
        if !is_call {
            return (open, after + 1);
        }
    }
    (start, end)
}

/// Combine a condition and its branches into piecewise form.
fn compile_condition(cond: &str, truthy: &str, falsy: Option<&str>) -> String {
    if let Some((a, b)) = split_word(cond, "and") {
        let inner = piecewise(b, truthy, falsy);
        piecewise(a, &inner, falsy)
    } else if let Some((a, b)) = split_word(cond, "or") {
        let inner = piecewise(b, truthy, falsy);
        piecewise(a, truthy, Some(&inner))
    } else {
        piecewise(cond, truthy, falsy)
    }
}

fn piecewise(cond: &str, truthy: &str, falsy: Option<&str>) -> String {
    match falsy {
        Some(falsy) => format!("{{{cond}:{truthy},{falsy}}}"),
        None => format!("{{{cond}:{truthy}}}"),
    }
}

/// Split `text` around the first occurrence of `word` standing alone between
/// whitespace.
fn split_word<'a>(text: &'a str, word: &str) -> Option<(&'a str, &'a str)> {
    let bytes = text.as_bytes();
    text.match_indices(word).find_map(|(i, _)| {
        let end = i + word.len();
        let spaced_before = i > 0 && bytes[i - 1].is_ascii_whitespace();
        let spaced_after = bytes.get(end).is_some_and(u8::is_ascii_whitespace);
        if !(spaced_before && spaced_after) {
            return None;
        }
        let (a, b) = (text[..i].trim(), text[end..].trim());
        (!a.is_empty() && !b.is_empty()).then_some((a, b))
    })
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'\\'
}

/// Whether `keyword` starts at `at` as a whole word.
fn is_keyword_at(text: &str, at: usize, keyword: &str) -> bool {
    let bytes = text.as_bytes();
    if !bytes[at.min(bytes.len())..].starts_with(keyword.as_bytes()) {
        return false;
    }
    let starts_word = at == 0 || !is_ident_byte(bytes[at - 1]);
    let ends_word = bytes
        .get(at + keyword.len())
        .is_none_or(|&b| !is_ident_byte(b));
    starts_word && ends_word
}

fn skip_ws(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Index of the bracket closing the one at `open`.
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
