//! Notation formatter: desugared script text to calculator notation.
//!
//! The formatter is a single left-to-right scan. Whitespace never reaches the
//! output; it only separates tokens, so `\pi r` keeps its escape intact.
//!
//! - braces, parentheses and brackets become `\left`/`\right` pairs
//! - `*` becomes `\cdot`, `<=`/`>=`/`!=` become `\le`/`\ge`/`\ne`
//! - `\word` escapes pass through untouched
//! - `frac(A,B)` and `sqrt(A)` become `\frac{A}{B}` and `\sqrt{A}`
//! - recognized function names followed by `(` are written as operators
//! - any other identifier of two or more characters is split into a symbol
//!   and a subscript, so `speed` renders as `s_{peed}`
//!
//! The formatter is pure and is not meant to be run over its own output.

/// How a recognized function name is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    /// A LaTeX control word: `\sin`.
    Command,
    /// A named operator: `\operatorname{floor}`.
    Operator,
}

#[rustfmt::skip]
const BUILTINS: &[(&str, Builtin)] = &[
    // Trigonometry
    ("sin", Builtin::Command), ("cos", Builtin::Command), ("tan", Builtin::Command),
    ("csc", Builtin::Command), ("sec", Builtin::Command), ("cot", Builtin::Command),
    ("sinh", Builtin::Command), ("cosh", Builtin::Command), ("tanh", Builtin::Command),
    ("arcsin", Builtin::Command), ("arccos", Builtin::Command), ("arctan", Builtin::Command),
    ("arccsc", Builtin::Operator), ("arcsec", Builtin::Operator), ("arccot", Builtin::Operator),
    // Logarithms and powers
    ("ln", Builtin::Command), ("log", Builtin::Command), ("exp", Builtin::Command),
    // Number theory and rounding
    ("min", Builtin::Command), ("max", Builtin::Command), ("gcd", Builtin::Command),
    ("lcm", Builtin::Operator), ("mod", Builtin::Operator),
    ("floor", Builtin::Operator), ("ceil", Builtin::Operator), ("round", Builtin::Operator),
    ("abs", Builtin::Operator), ("sign", Builtin::Operator),
    ("nCr", Builtin::Operator), ("nPr", Builtin::Operator),
    // Statistics and lists
    ("mean", Builtin::Operator), ("median", Builtin::Operator), ("var", Builtin::Operator),
    ("stdev", Builtin::Operator), ("stddev", Builtin::Operator), ("total", Builtin::Operator),
    ("length", Builtin::Operator), ("count", Builtin::Operator), ("sort", Builtin::Operator),
    ("shuffle", Builtin::Operator), ("unique", Builtin::Operator), ("random", Builtin::Operator),
    // Geometry and color
    ("distance", Builtin::Operator), ("midpoint", Builtin::Operator),
    ("polygon", Builtin::Operator), ("rgb", Builtin::Operator), ("hsv", Builtin::Operator),
];

fn builtin(name: &str) -> Option<Builtin> {
    BUILTINS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, kind)| *kind)
}

/// Format a line of script text as calculator notation.
pub fn format(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Notation::default();
    write_chars(&chars, &mut out);
    out.buf
}

/// Output buffer that keeps control words from running into letters.
#[derive(Default)]
struct Notation {
    buf: String,
    after_command: bool,
}

impl Notation {
    /// Write `\word`.
    fn command(&mut self, word: &str) {
        self.buf.push('\\');
        self.buf.push_str(word);
        self.after_command = true;
    }

    fn text(&mut self, text: &str) {
        if self.after_command && text.starts_with(|c: char| c.is_ascii_alphabetic()) {
            self.buf.push(' ');
        }
        self.buf.push_str(text);
        self.after_command = false;
    }

    fn char(&mut self, c: char) {
        self.text(c.encode_utf8(&mut [0; 4]));
    }
}

fn write_chars(chars: &[char], out: &mut Notation) {
    let mut i = 0;
    while i < chars.len() {
        let next = chars.get(i + 1).copied();
        match chars[i] {
            c if c.is_whitespace() => {}
            '\\' => {
                let end = scan_while(chars, i + 1, |c| c.is_ascii_alphabetic());
                if end > i + 1 {
                    out.command(&collect(&chars[i + 1..end]));
                    i = end;
                } else if let Some(escaped) = next {
                    out.text(&format!("\\{escaped}"));
                    i += 2;
                } else {
                    out.char('\\');
                    i += 1;
                }
                continue;
            }
            '{' => out.text(r"\left\{"),
            '}' => out.text(r"\right\}"),
            '(' => out.text(r"\left("),
            ')' => out.text(r"\right)"),
            '[' => out.text(r"\left["),
            ']' => out.text(r"\right]"),
            '*' => out.command("cdot"),
            op @ ('<' | '>' | '!') if next == Some('=') => {
                out.command(match op {
                    '<' => "le",
                    '>' => "ge",
                    _ => "ne",
                });
                i += 2;
                continue;
            }
            c if c.is_ascii_alphabetic() => {
                i = write_word(chars, i, out);
                continue;
            }
            c => out.char(c),
        }
        i += 1;
    }
}

/// Write the identifier starting at `start` and return the index after it.
fn write_word(chars: &[char], start: usize, out: &mut Notation) -> usize {
    let end = scan_while(chars, start + 1, |c| c.is_ascii_alphanumeric());
    let word = collect(&chars[start..end]);
    let after = scan_while(chars, end, |c| c.is_whitespace());
    let next = chars.get(after).copied();

    if next == Some('(') {
        if let Some(close) = matching_close(chars, after) {
            let inner = &chars[after + 1..close];
            match (word.as_str(), split_args(inner).as_slice()) {
                ("frac", [num, den]) => {
                    out.text(r"\frac{");
                    write_chars(num, out);
                    out.text("}{");
                    write_chars(den, out);
                    out.text("}");
                    return close + 1;
                }
                ("sqrt", [_]) => {
                    out.text(r"\sqrt{");
                    write_chars(inner, out);
                    out.text("}");
                    return close + 1;
                }
                _ => {}
            }
        }
        match builtin(&word) {
            Some(Builtin::Command) => {
                out.command(&word);
                return end;
            }
            Some(Builtin::Operator) => {
                out.text(&format!(r"\operatorname{{{word}}}"));
                return end;
            }
            None => {}
        }
    }

    if word == "log" && next == Some('_') {
        let base_end = scan_while(chars, after + 1, |c| c.is_ascii_alphanumeric());
        if base_end > after + 1 {
            out.command("log");
            out.text(&format!("_{{{}}}", collect(&chars[after + 1..base_end])));
            return base_end;
        }
    }

    write_identifier(&word, out);
    end
}

/// `x` stays `x`; `xyz` becomes `x_{yz}`.
fn write_identifier(word: &str, out: &mut Notation) {
    let mut letters = word.chars();
    let Some(first) = letters.next() else {
        return;
    };
    out.char(first);
    let rest = letters.as_str();
    if !rest.is_empty() {
        out.text(&format!("_{{{rest}}}"));
    }
}

fn scan_while(chars: &[char], from: usize, pred: impl Fn(&char) -> bool) -> usize {
    let mut end = from;
    while end < chars.len() && pred(&chars[end]) {
        end += 1;
    }
    end
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Index of the `)` closing the `(` at `open`.
fn matching_close(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return (c == ')').then_some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split call arguments at top-level commas.
fn split_args(chars: &[char]) -> Vec<&[char]> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(&chars[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(&chars[start..]);
    args
}
