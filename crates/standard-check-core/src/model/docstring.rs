//! Docstring cleaning and arguments-section extraction.

/// Section headers that open an arguments block.
const ARG_HEADERS: &[&str] = &["args", "arguments", "parameters", "params"];

/// Every section header recognised as ending the previous section.
const SECTION_HEADERS: &[&str] = &[
    "args",
    "arguments",
    "parameters",
    "params",
    "keyword args",
    "keyword arguments",
    "other parameters",
    "returns",
    "return",
    "yields",
    "yield",
    "raises",
    "notes",
    "note",
    "updates",
    "examples",
    "example",
    "attributes",
    "see also",
    "todo",
    "warning",
    "warnings",
];

/// One `name (type): description` entry of an arguments section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocArg {
    /// Documented argument name, `*` markers kept.
    pub name: String,
    /// Text inside the parentheses after the name.
    pub type_hint: Option<String>,
    /// Description, continuation lines joined with single spaces.
    pub description: String,
}

/// A cleaned docstring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docstring {
    lines: Vec<String>,
    args: Vec<DocArg>,
}

impl Docstring {
    /// Cleans raw docstring text. Returns `None` for blank docstrings.
    ///
    /// Leading and trailing blank lines are removed, as is the common
    /// indentation of every line after the first.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let lines = clean_lines(raw);
        if lines.is_empty() {
            return None;
        }
        let args = parse_arg_sections(&lines);
        Some(Self { lines, args })
    }

    /// Cleaned lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// First line of the cleaned text.
    #[must_use]
    pub fn first_line(&self) -> &str {
        self.lines.first().map_or("", String::as_str)
    }

    /// Cleaned text, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Entries of every arguments section, in order.
    #[must_use]
    pub fn args(&self) -> &[DocArg] {
        &self.args
    }

    /// Returns true if the docstring has at least one arguments entry.
    #[must_use]
    pub fn has_args_section(&self) -> bool {
        !self.args.is_empty()
    }
}

/// Returns true if `line` is a recognised section header such as `Args:`.
#[must_use]
pub fn is_section_header(line: &str) -> bool {
    header_name(line).is_some_and(|h| SECTION_HEADERS.contains(&h.as_str()))
}

fn is_args_header(line: &str) -> bool {
    header_name(line).is_some_and(|h| ARG_HEADERS.contains(&h.as_str()))
}

fn header_name(line: &str) -> Option<String> {
    line.trim()
        .strip_suffix(':')
        .map(|h| h.trim().to_lowercase())
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn clean_lines(raw: &str) -> Vec<String> {
    let expanded = raw.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    if let Some(first) = lines.first() {
        out.push(first.trim().to_string());
    }
    for line in lines.iter().skip(1) {
        let cut = margin.min(indent_of(line));
        out.push(line[cut..].trim_end().to_string());
    }

    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }
    let start = out
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(out.len());
    out.drain(..start);
    out
}

fn parse_arg_sections(lines: &[String]) -> Vec<DocArg> {
    let mut entries: Vec<DocArg> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !is_args_header(&lines[i]) {
            i += 1;
            continue;
        }
        i += 1;

        let mut entry_indent: Option<usize> = None;
        while i < lines.len() {
            let line = &lines[i];
            if line.trim().is_empty() || is_section_header(line) {
                break;
            }
            let indent = indent_of(line);
            match entry_indent {
                Some(base) if indent > base => {
                    if let Some(last) = entries.last_mut() {
                        if !last.description.is_empty() {
                            last.description.push(' ');
                        }
                        last.description.push_str(line.trim());
                    }
                }
                Some(base) if indent < base => break,
                _ => match parse_entry(line.trim()) {
                    Some(entry) => {
                        entry_indent = Some(indent);
                        entries.push(entry);
                    }
                    None => break,
                },
            }
            i += 1;
        }
    }

    entries
}

fn parse_entry(text: &str) -> Option<DocArg> {
    let stars = text.len() - text.trim_start_matches('*').len();
    if stars > 2 {
        return None;
    }
    let rest = &text[stars..];
    let name_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if name_len == 0 || rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let name = text[..stars + name_len].to_string();

    let mut rest = rest[name_len..].trim_start();
    let mut type_hint = None;
    if let Some(inner) = rest.strip_prefix('(') {
        let close = inner.find(')')?;
        type_hint = Some(inner[..close].trim().to_string());
        rest = inner[close + 1..].trim_start();
    }

    let description = rest.strip_prefix(':')?.trim().to_string();
    Some(DocArg {
        name,
        type_hint,
        description,
    })
}
