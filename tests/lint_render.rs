//! Lint: key hints such as `[C]` or `[1]` must be tappable.
//!
//! Any line added with `cl.push(...)` is drawn but never registered as a
//! click target, so a key hint inside it works on keyboards and silently
//! fails on phones. Hints belong in `push_clickable(...)`.
//!
//! The scan covers every `render.rs` under `src/` and follows `push(` calls
//! across lines until their parentheses close.

use std::fs;
use std::path::Path;

/// `[X]` where X is a single key character.
fn contains_bracket_key(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-=!~".contains(&w[1]))
    })
}

fn strip_comment(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") {
        ""
    } else {
        line
    }
}

/// Net parenthesis depth change of a line, ignoring string contents.
fn paren_delta(line: &str) -> i32 {
    let mut depth = 0;
    let mut in_str = false;
    let mut escaped = false;
    for c in line.chars() {
        if in_str {
            match (escaped, c) {
                (true, _) => escaped = false,
                (false, '\\') => escaped = true,
                (false, '"') => in_str = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_str = true,
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth
}

/// `(line_number, first_line)` of each non-clickable `push(` call whose
/// arguments contain a key hint.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    let lines: Vec<&str> = source.lines().map(strip_comment).collect();
    let mut violations = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let Some(pos) = line.find(".push(") else {
            i += 1;
            continue;
        };

        // collect the whole call
        let start = i;
        let mut call = String::from(&line[pos..]);
        let mut depth = paren_delta(&line[pos..]);
        while depth > 0 && i + 1 < lines.len() {
            i += 1;
            call.push('\n');
            call.push_str(lines[i]);
            depth += paren_delta(lines[i]);
        }

        if contains_bracket_key(&call) {
            violations.push((start + 1, line.trim().to_string()));
        }
        i += 1;
    }

    violations
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut all_violations = Vec::new();
    let mut scanned = 0;

    visit_render_files(&src_dir, &mut all_violations, &mut scanned);
    assert!(scanned > 0, "no render.rs found under src/");

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found key hints [X] in non-clickable cl.push() calls.\n\
             Use push_clickable() so the hint can be tapped.\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

fn visit_render_files(
    dir: &Path,
    violations: &mut Vec<(String, usize, String)>,
    scanned: &mut usize,
) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations, scanned);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            *scanned += 1;
            let display_path = path.display().to_string();
            for (line_num, line) in find_bracket_key_in_push(&source) {
                violations.push((display_path.clone(), line_num, line));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_single_line_push() {
        let source = r#"cl.push(Line::from(" [C] Click to harvest Matter"));"#;
        assert_eq!(find_bracket_key_in_push(source).len(), 1);
    }

    #[test]
    fn detects_multi_line_push() {
        let source = r#"
    cl.push(Line::from(Span::styled(
        "[R] Big Crunch",
        Style::default(),
    )));
    cl.push(Line::from(""));
"#;
        let v = find_bracket_key_in_push(source);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].0, 2);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"
    cl.push_clickable(
        Line::from("[1] Stardust Collector"),
        BUY_GENERATOR_BASE,
    );
"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn push_call_ends_at_closing_paren() {
        let source = r#"
    cl.push(Line::from("header"));
    let hint = "[Y] confirm";
"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn parens_inside_strings_are_ignored() {
        let source = r#"
    cl.push(Line::from(":) ("));
    let hint = "[Y] confirm";
"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" [C] harvest"));"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[C]"));
        assert!(contains_bracket_key("[1]"));
        assert!(contains_bracket_key("[-]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[CC]"));
        assert!(!contains_bracket_key("[{}]"));
        assert!(!contains_bracket_key("abc"));
    }
}
