//! Terminal prompt for custom command templates.

use std::io::{self, BufRead};

use async_trait::async_trait;
use console::{style, Key, Term};

use crate::domain::errors::PromptError;
use crate::domain::ports::TemplatePrompt;

const TITLE: &str = "Enter your custom command";
const DESCRIPTION: &str = "You must use %s somewhere to insert the cluster name";
const EXAMPLE: &str = "e.g. kubectl get pods -n %s";

/// Asks for a template on the controlling terminal.
///
/// On a TTY input is read key by key so Esc and Ctrl+C cancel the prompt.
/// Without a TTY one line is read from stdin; end of input cancels.
/// The entered text is used as typed, without trimming.
#[derive(Debug, Clone)]
pub struct ConsolePrompt {
    term: Term,
}

impl ConsolePrompt {
    /// Prompt on stderr, leaving stdout for the report.
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplatePrompt for ConsolePrompt {
    async fn request_template(&self) -> Result<String, PromptError> {
        let term = self.term.clone();
        tokio::task::spawn_blocking(move || read_template(&term))
            .await
            .map_err(|e| PromptError::Cancelled(e.to_string()))?
    }
}

fn read_template(term: &Term) -> Result<String, PromptError> {
    term.write_line(&style(TITLE).bold().to_string())?;
    term.write_line(&style(DESCRIPTION).dim().to_string())?;

    if !term.is_term() {
        return read_plain_line(&mut io::stdin().lock());
    }

    term.write_str(&format!("{} ", style("›").cyan()))?;
    term.write_str(&style(EXAMPLE).dim().to_string())?;
    term.move_cursor_left(EXAMPLE.chars().count())?;

    read_keyed(|| term.read_key(), |edit, input| echo(term, edit, input))
}

/// One line from `reader` with its line terminator removed.
fn read_plain_line<R: BufRead>(reader: &mut R) -> Result<String, PromptError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(PromptError::Cancelled("end of input".to_string()));
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Effect of one key on the line being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Submit,
    Cancel,
    Inserted(char),
    Erased,
    Ignored,
}

fn apply_key(input: &mut String, key: &Key) -> Edit {
    match key {
        Key::Enter => Edit::Submit,
        Key::Escape | Key::Char('\u{3}') => Edit::Cancel,
        Key::Backspace => {
            if input.pop().is_some() {
                Edit::Erased
            } else {
                Edit::Ignored
            }
        }
        Key::Char(c) if !c.is_control() => {
            input.push(*c);
            Edit::Inserted(*c)
        }
        _ => Edit::Ignored,
    }
}

/// Edit a line from `next_key` until Enter, Esc or Ctrl+C.
///
/// `echo` sees every edit together with the input before the edit.
fn read_keyed<K, E>(mut next_key: K, mut echo: E) -> Result<String, PromptError>
where
    K: FnMut() -> io::Result<Key>,
    E: FnMut(Edit, &str) -> io::Result<()>,
{
    let mut input = String::new();
    loop {
        let key = match next_key() {
            Ok(key) => key,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Err(cancelled()),
            Err(e) => return Err(e.into()),
        };

        let before = input.clone();
        let edit = apply_key(&mut input, &key);
        echo(edit, &before)?;
        match edit {
            Edit::Submit => return Ok(input),
            Edit::Cancel => return Err(cancelled()),
            Edit::Inserted(_) | Edit::Erased | Edit::Ignored => {}
        }
    }
}

fn echo(term: &Term, edit: Edit, before: &str) -> io::Result<()> {
    match edit {
        Edit::Submit | Edit::Cancel => term.write_line(""),
        Edit::Erased => term.clear_chars(1),
        Edit::Inserted(c) => {
            if before.is_empty() {
                // Hide the example once the operator starts typing.
                term.write_str(&" ".repeat(EXAMPLE.chars().count()))?;
                term.move_cursor_left(EXAMPLE.chars().count())?;
            }
            term.write_str(&c.to_string())
        }
        Edit::Ignored => Ok(()),
    }
}

fn cancelled() -> PromptError {
    PromptError::Cancelled("user aborted".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn keyed(keys: Vec<io::Result<Key>>) -> Result<String, PromptError> {
        let mut keys: VecDeque<_> = keys.into();
        read_keyed(
            || {
                keys.pop_front()
                    .unwrap_or_else(|| Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no keys")))
            },
            |_, _| Ok(()),
        )
    }

    fn typed(text: &str) -> Vec<io::Result<Key>> {
        text.chars().map(|c| Ok(Key::Char(c))).collect()
    }

    #[test]
    fn test_enter_returns_typed_line() {
        let mut keys = typed("ls %s");
        keys.push(Ok(Key::Enter));
        assert_eq!(keyed(keys).unwrap(), "ls %s");
    }

    #[test]
    fn test_line_is_not_trimmed() {
        let mut keys = typed(" ls %s ");
        keys.push(Ok(Key::Enter));
        assert_eq!(keyed(keys).unwrap(), " ls %s ");
    }

    #[test]
    fn test_backspace_erases() {
        let mut keys = vec![Ok(Key::Backspace)];
        keys.extend(typed("lss"));
        keys.push(Ok(Key::Backspace));
        keys.extend(typed(" %s"));
        keys.push(Ok(Key::ArrowLeft));
        keys.push(Ok(Key::Enter));
        assert_eq!(keyed(keys).unwrap(), "ls %s");
    }

    #[test]
    fn test_escape_cancels() {
        let mut keys = typed("ls");
        keys.push(Ok(Key::Escape));
        assert!(matches!(keyed(keys), Err(PromptError::Cancelled(detail)) if detail == "user aborted"));
    }

    #[test]
    fn test_ctrl_c_cancels() {
        assert!(matches!(keyed(vec![Ok(Key::Char('\u{3}'))]), Err(PromptError::Cancelled(_))));
        let interrupted = io::Error::new(io::ErrorKind::Interrupted, "read interrupted");
        assert!(matches!(keyed(vec![Err(interrupted)]), Err(PromptError::Cancelled(_))));
    }

    #[test]
    fn test_read_error_is_io() {
        assert!(matches!(keyed(Vec::new()), Err(PromptError::Io(_))));
    }

    #[test]
    fn test_echo_sees_input_before_edit() {
        let mut keys: VecDeque<Key> = vec![Key::Char('l'), Key::Char('s'), Key::Enter].into();
        let mut seen = Vec::new();
        let line = read_keyed(
            || Ok(keys.pop_front().unwrap_or(Key::Enter)),
            |edit, before| {
                seen.push((edit, before.to_string()));
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(line, "ls");
        assert_eq!(
            seen,
            vec![
                (Edit::Inserted('l'), String::new()),
                (Edit::Inserted('s'), "l".to_string()),
                (Edit::Submit, "ls".to_string()),
            ]
        );
    }

    #[test]
    fn test_plain_line_from_reader() {
        let mut input: &[u8] = b"ls %s\nignored\n";
        assert_eq!(read_plain_line(&mut input).unwrap(), "ls %s");
    }

    #[test]
    fn test_plain_line_strips_only_terminator() {
        let mut input: &[u8] = b"  kubectl --context %s get ns \r\n";
        assert_eq!(
            read_plain_line(&mut input).unwrap(),
            "  kubectl --context %s get ns "
        );

        let mut unterminated: &[u8] = b"ls %s";
        assert_eq!(read_plain_line(&mut unterminated).unwrap(), "ls %s");
    }

    #[test]
    fn test_plain_end_of_input_cancels() {
        let mut input: &[u8] = b"";
        assert!(matches!(
            read_plain_line(&mut input),
            Err(PromptError::Cancelled(detail)) if detail == "end of input"
        ));
    }
}
