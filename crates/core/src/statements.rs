//! Statement-level tokenization for GMPL data files.
//!
//! Turns raw file text into a sequence of cleaned, semicolon-delimited
//! statement strings, and statement strings into whitespace tokens.
//! Comments are stripped before splitting, so `;` inside a comment never
//! terminates a statement. The trailing `;` is not part of a statement.

/// Remove an inline `#` comment. The data format has no quoted strings
/// that could contain `#`, so a plain scan is sufficient.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Strip comments, normalize tabs to spaces, trim outer whitespace.
fn clean(line: &str) -> String {
    strip_comment(line).replace('\t', " ").trim().to_owned()
}

/// Split file text into statements delimited by `;`.
///
/// A statement may span several physical lines, and one physical line may
/// hold several statements. A literal `end` line (optionally `end;`)
/// terminates the stream; anything after it is ignored. Trailing content
/// with no terminator is flushed as one final statement -- truncated files
/// degrade, they do not fail.
pub fn split_statements(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut statements: Vec<String> = Vec::new();
    let mut buf: Vec<String> = Vec::new();

    for raw in text.lines() {
        let mut cleaned = clean(raw);
        if cleaned.is_empty() {
            continue;
        }

        if cleaned.to_lowercase().trim_end_matches([';', ' ']) == "end" {
            if !buf.is_empty() {
                statements.push(buf.join(" "));
                buf.clear();
            }
            statements.push("end".to_owned());
            break;
        }

        while let Some(idx) = cleaned.find(';') {
            let before = cleaned[..idx].trim();
            if !before.is_empty() {
                buf.push(before.to_owned());
            }
            statements.push(buf.join(" "));
            buf.clear();
            cleaned = cleaned[idx + 1..].trim().to_owned();
        }

        if !cleaned.is_empty() {
            buf.push(cleaned);
        }
    }

    if !buf.is_empty() {
        statements.push(buf.join(" "));
    }
    statements
}

/// Split a statement into whitespace tokens, un-gluing `:=` from adjacent
/// text: `999:=` becomes `999`, `:=` and `default:=0.05` becomes
/// `default`, `:=`, `0.05`. The parser can then treat `:=` positionally.
pub fn split_tokens(stmt: &str) -> Vec<String> {
    let mut result = Vec::new();
    for tok in stmt.split_whitespace() {
        if tok == ":=" {
            result.push(tok.to_owned());
            continue;
        }
        if let Some(pos) = tok.find(":=") {
            let head = &tok[..pos];
            let tail = &tok[pos + 2..];
            if !head.is_empty() {
                result.push(head.to_owned());
            }
            result.push(":=".to_owned());
            if !tail.is_empty() {
                result.push(tail.to_owned());
            }
        } else {
            result.push(tok.to_owned());
        }
    }
    result
}
