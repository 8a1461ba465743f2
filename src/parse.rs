//! Tsh Command Parser
//!
//! Whitespace splitting is the entire grammar: no quoting, no escaping, no
//! glob expansion.

/// The parsed form of a single line of input.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandLine {
    /// The first token: builtin lookup key or program name.
    pub program: String,
    /// The remaining tokens, in order.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Splits `input` on whitespace.
    ///
    /// Empty and whitespace-only lines are a no-op, never an error, so they
    /// parse to `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsh_rs::parse::CommandLine;
    ///
    /// let line = CommandLine::parse("runfg prog arg").unwrap();
    /// assert_eq!(line.program, "runfg");
    /// assert_eq!(line.args, vec!["prog", "arg"]);
    ///
    /// assert!(CommandLine::parse("   \t ").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<CommandLine> {
        let mut tokens = input.split_whitespace().map(String::from);
        let program = tokens.next()?;
        Some(CommandLine {
            program,
            args: tokens.collect(),
        })
    }

    /// Rebuilds the exec-style argument vector, where by convention
    /// `argv[0]` is the program itself.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_noop() {
        assert_eq!(CommandLine::parse(""), None);
        assert_eq!(CommandLine::parse("    "), None);
        assert_eq!(CommandLine::parse("\t\n"), None);
    }

    #[test]
    fn splits_on_any_whitespace() {
        let line = CommandLine::parse("  cd\t/tmp ").unwrap();
        assert_eq!(line.program, "cd");
        assert_eq!(line.args, vec!["/tmp"]);
    }

    #[test]
    fn bare_program_has_no_args() {
        let line = CommandLine::parse("killbg").unwrap();
        assert_eq!(line.program, "killbg");
        assert!(line.args.is_empty());
    }

    #[test]
    fn argv_leads_with_the_program() {
        let line = CommandLine::parse("echo one two").unwrap();
        assert_eq!(line.argv(), vec!["echo", "one", "two"]);
        assert_eq!(line.args, vec!["one", "two"]);
    }
}
