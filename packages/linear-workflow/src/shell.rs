//! Splits a shell command line into the simple commands it runs.
//!
//! This is not a shell parser. It tracks just enough state (quotes, `$(...)`
//! nesting, here-documents) to find the boundaries between commands, so that
//! flags and here-doc bodies belonging to one command are never attributed to
//! another.

/// One simple command from a command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleCommand {
    /// The command text, without the bodies of here-docs it declares.
    pub text: String,

    /// Bodies of top-level here-docs declared by this command, in order.
    pub heredocs: Vec<String>,
}

impl SimpleCommand {
    /// The command's words, as the shell would split them.
    ///
    /// Text that cannot be tokenized as shell words falls back to whitespace
    /// splitting.
    pub fn words(&self) -> Vec<String> {
        shell_words::split(&self.text)
            .unwrap_or_else(|_| self.text.split_whitespace().map(String::from).collect())
    }
}

/// A here-doc whose body has not been read yet.
#[derive(Debug)]
struct PendingHereDoc {
    delimiter: String,
    owner: usize,
}

/// Split `line` on the control operators `;`, `&`, `&&`, `|`, `||`, `(`, `)`
/// and newlines that appear outside quotes and command substitutions.
///
/// Here-doc bodies are attached to the command that declared them rather
/// than being read as commands.
pub fn split_commands(line: &str) -> Vec<SimpleCommand> {
    let chars = line.chars().collect::<Vec<_>>();
    let mut commands = Vec::new();
    let mut current = String::new();
    let mut pending = Vec::<PendingHereDoc>::new();
    let mut quote = None::<char>;
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if let Some(open) = quote {
            current.push(c);
            if c == '\\' && open == '"' {
                if let Some(escaped) = next {
                    current.push(escaped);
                    i += 1;
                }
            } else if c == open {
                quote = None;
            }
            i += 1;
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                current.push(c);
            }
            '\\' => {
                current.push(c);
                if let Some(escaped) = next {
                    current.push(escaped);
                    i += 1;
                }
            }
            '$' if next == Some('(') => {
                depth += 1;
                current.push_str("$(");
                i += 1;
            }
            '(' if depth > 0 => {
                depth += 1;
                current.push(c);
            }
            ')' if depth > 0 => {
                depth -= 1;
                current.push(c);
            }
            '<' if next == Some('<') && chars.get(i + 2) != Some(&'<') => {
                let (declared, delimiter) = read_heredoc_operator(&chars, i);
                current.extend(&chars[i..declared]);
                if depth == 0
                    && let Some(delimiter) = delimiter
                {
                    pending.push(PendingHereDoc {
                        delimiter,
                        owner: commands.len(),
                    });
                }
                i = declared;
                continue;
            }
            '&' if matches!(i.checked_sub(1).map(|prev| chars[prev]), Some('>' | '<'))
                || next == Some('>') =>
            {
                current.push(c);
            }
            '\n' if depth == 0 => {
                finish(&mut commands, &mut current);
                i = read_heredoc_bodies(&chars, i + 1, &mut pending, &mut commands);
                continue;
            }
            ';' | '&' | '|' | '(' | ')' if depth == 0 => finish(&mut commands, &mut current),
            _ => current.push(c),
        }
        i += 1;
    }
    finish(&mut commands, &mut current);
    commands
}

fn finish(commands: &mut Vec<SimpleCommand>, current: &mut String) {
    let text = std::mem::take(current);
    if !text.trim().is_empty() {
        commands.push(SimpleCommand {
            text: text.trim().to_string(),
            heredocs: Vec::new(),
        });
    }
}

/// Read a `<<`, `<<-` or `<<~` operator and its delimiter word starting at `start`.
///
/// Returns the index just past the operator and the unquoted delimiter.
fn read_heredoc_operator(chars: &[char], start: usize) -> (usize, Option<String>) {
    let mut i = start + 2;
    if matches!(chars.get(i).copied(), Some('-' | '~')) {
        i += 1;
    }
    while chars.get(i).is_some_and(|c| *c == ' ' || *c == '\t') {
        i += 1;
    }
    let quoted = chars.get(i).copied().filter(|c| *c == '\'' || *c == '"');
    if quoted.is_some() {
        i += 1;
    }

    let mut delimiter = String::new();
    while let Some(c) = chars.get(i).copied().filter(|c| c.is_alphanumeric() || *c == '_') {
        delimiter.push(c);
        i += 1;
    }
    if let Some(q) = quoted
        && chars.get(i) == Some(&q)
    {
        i += 1;
    }
    (i, (!delimiter.is_empty()).then_some(delimiter))
}

/// Read the bodies of every pending here-doc, starting at the line at `start`.
///
/// Returns the index of the first character after the last body.
fn read_heredoc_bodies(
    chars: &[char],
    start: usize,
    pending: &mut Vec<PendingHereDoc>,
    commands: &mut [SimpleCommand],
) -> usize {
    let mut i = start;
    for heredoc in pending.drain(..) {
        let mut body = Vec::new();
        while i < chars.len() {
            let end = chars[i..]
                .iter()
                .position(|c| *c == '\n')
                .map_or(chars.len(), |offset| i + offset);
            let line = chars[i..end].iter().collect::<String>();
            i = (end + 1).min(chars.len());
            if line.trim() == heredoc.delimiter {
                break;
            }
            body.push(line);
        }
        if let Some(owner) = commands.get_mut(heredoc.owner) {
            owner.heredocs.push(body.join("\n"));
        }
    }
    i
}
