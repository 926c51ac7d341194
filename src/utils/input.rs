use regex::Regex;
use std::io;
use std::io::{BufRead, Write};
use std::sync::LazyLock;

static ID_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("id separator pattern"));

/// Splits free text on commas and whitespace, dropping blank tokens.
/// Order and duplicates are kept.
pub fn parse_course_ids(text: &str) -> Vec<String> {
    ID_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prompts on stderr and reads stdin until EOF or an empty line, so pasted
/// multi-line lists work and stdout stays clean for the report.
pub fn input_lines(prompt: &str) -> io::Result<String> {
    read_lines(prompt, io::stdin().lock(), &mut io::stderr())
}

fn read_lines<R: BufRead, W: Write>(prompt: &str, reader: R, prompt_out: &mut W) -> io::Result<String> {
    writeln!(prompt_out, "{}", prompt)?;
    prompt_out.flush()?;

    let mut text = String::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}
