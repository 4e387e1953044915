//! Operator selection of relations and options.
//!
//! Lists are shown 1-based; providers return 0-based indices. Malformed or
//! out-of-range input is a [`ScaffoldError::Selection`] and aborts the run.

use crate::error::{Result, ScaffoldError};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of operator choices
pub trait SelectionProvider {
    /// Pick exactly one item
    fn select_one(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Pick one or more items
    fn select_many(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;
}

/// Parse a 1-based index into a 0-based one
pub fn parse_index(input: &str, len: usize) -> Result<usize> {
    let trimmed = input.trim();
    let number: usize = trimmed
        .parse()
        .map_err(|_| ScaffoldError::Selection(format!("'{}' is not a number", trimmed)))?;

    if number == 0 || number > len {
        return Err(ScaffoldError::Selection(format!(
            "{} is out of range (1-{})",
            number, len
        )));
    }
    Ok(number - 1)
}

/// Parse a comma-separated list of 1-based indices, keeping input order
pub fn parse_indices(input: &str, len: usize) -> Result<Vec<usize>> {
    input.split(',').map(|part| parse_index(part, len)).collect()
}

/// Prompts on a writer and reads answers line by line from a reader
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl PromptSelector<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        PromptSelector::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        PromptSelector { input, output }
    }

    fn ask(&mut self, prompt: &str, items: &[String]) -> Result<String> {
        if items.is_empty() {
            return Err(ScaffoldError::Selection("nothing to select from".to_string()));
        }

        let io_err = |e: io::Error| ScaffoldError::io("<terminal>", e);
        for (idx, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, item).map_err(io_err)?;
        }
        write!(self.output, "{}: ", prompt).map_err(io_err)?;
        self.output.flush().map_err(io_err)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_err)?;
        if read == 0 {
            return Err(ScaffoldError::Selection("no input".to_string()));
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> SelectionProvider for PromptSelector<R, W> {
    fn select_one(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        let line = self.ask(prompt, items)?;
        parse_index(&line, items.len())
    }

    fn select_many(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        let line = self.ask(prompt, items)?;
        parse_indices(&line, items.len())
    }
}

/// Replays fixed 0-based answers, one per call
#[derive(Debug, Default)]
pub struct ScriptedSelector {
    answers: VecDeque<Vec<usize>>,
}

impl ScriptedSelector {
    pub fn new<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = Vec<usize>>,
    {
        ScriptedSelector {
            answers: answers.into_iter().collect(),
        }
    }

    fn next(&mut self, items: &[String]) -> Result<Vec<usize>> {
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| ScaffoldError::Selection("no scripted answer left".to_string()))?;

        if let Some(bad) = answer.iter().find(|&&i| i >= items.len()) {
            return Err(ScaffoldError::Selection(format!(
                "{} is out of range (1-{})",
                bad + 1,
                items.len()
            )));
        }
        Ok(answer)
    }
}

impl SelectionProvider for ScriptedSelector {
    fn select_one(&mut self, _prompt: &str, items: &[String]) -> Result<usize> {
        match self.next(items)?.as_slice() {
            [one] => Ok(*one),
            other => Err(ScaffoldError::Selection(format!(
                "expected one choice, got {}",
                other.len()
            ))),
        }
    }

    fn select_many(&mut self, _prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        self.next(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<String> {
        vec!["orders".to_string(), "users".to_string(), "v_sales".to_string()]
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index(" 2\n", 3).unwrap(), 1);
        assert!(matches!(parse_index("0", 3), Err(ScaffoldError::Selection(_))));
        assert!(matches!(parse_index("4", 3), Err(ScaffoldError::Selection(_))));
        assert!(matches!(parse_index("two", 3), Err(ScaffoldError::Selection(_))));
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!(parse_indices("3, 1,2", 3).unwrap(), vec![2, 0, 1]);
        assert!(parse_indices("1,,2", 3).is_err());
        assert!(parse_indices("1,9", 3).is_err());
    }

    #[test]
    fn test_prompt_selector_lists_items() {
        let mut output = Vec::new();
        let mut selector = PromptSelector::new("2\n".as_bytes(), &mut output);

        let choice = selector.select_one("Select a table by number", &items()).unwrap();
        assert_eq!(choice, 1);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("1. orders\n2. users\n3. v_sales\n"));
        assert!(shown.ends_with("Select a table by number: "));
    }

    #[test]
    fn test_prompt_selector_many_and_eof() {
        let mut selector = PromptSelector::new("1,3\n".as_bytes(), io::sink());
        assert_eq!(selector.select_many("Pick", &items()).unwrap(), vec![0, 2]);
        assert!(matches!(
            selector.select_one("Pick", &items()),
            Err(ScaffoldError::Selection(_))
        ));
    }

    #[test]
    fn test_prompt_selector_empty_list() {
        let mut selector = PromptSelector::new("1\n".as_bytes(), io::sink());
        assert!(selector.select_one("Pick", &[]).is_err());
    }

    #[test]
    fn test_scripted_selector() {
        let mut selector = ScriptedSelector::new([vec![1], vec![0, 2], vec![5]]);
        assert_eq!(selector.select_one("", &items()).unwrap(), 1);
        assert_eq!(selector.select_many("", &items()).unwrap(), vec![0, 2]);
        assert!(selector.select_many("", &items()).is_err());
        assert!(selector.select_one("", &items()).is_err());
    }
}
