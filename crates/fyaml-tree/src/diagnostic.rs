//! Diagnostic rendering for build errors.

use ariadne::{Color, Label, Report, ReportKind, Source};
use fyaml_tokenizer::LexErrorKind;

use crate::error::{AnchorErrorKind, BuildError, ParseErrorKind};

impl BuildError {
    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span().into();

        match self {
            BuildError::Lex(e) => {
                let (label, help) = match &e.kind {
                    LexErrorKind::TabIndentation => {
                        ("tab here", Some("indent with spaces; tabs are not allowed"))
                    }
                    LexErrorKind::InconsistentIndentation { .. } => (
                        "dedents to an unknown level",
                        Some("align this line with an enclosing block"),
                    ),
                    LexErrorKind::UnterminatedQuote { double: true } => {
                        ("string starts here", Some("add a closing '\"'"))
                    }
                    LexErrorKind::UnterminatedQuote { double: false } => {
                        ("string starts here", Some("add a closing \"'\""))
                    }
                    LexErrorKind::InvalidEscape(_) => (
                        "invalid escape",
                        Some("valid escapes include \\\\, \\\", \\n, \\t, \\xXX, \\uXXXX and \\UXXXXXXXX"),
                    ),
                    LexErrorKind::InvalidBlockHeader => (
                        "malformed header",
                        Some("a block header is '|' or '>' with an optional '-'/'+' and indentation digit"),
                    ),
                    LexErrorKind::EmptyAnchorName => ("name expected", None),
                    LexErrorKind::UnexpectedCharacter(_) => ("unexpected", None),
                };
                let report = Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(e.kind.to_string())
                    .with_label(
                        Label::new((filename, range))
                            .with_message(label)
                            .with_color(Color::Red),
                    );
                match help {
                    Some(help) => report.with_help(help),
                    None => report,
                }
            }

            BuildError::Parse(e) => match &e.kind {
                ParseErrorKind::DuplicateKey { key, first } => {
                    let first_range: std::ops::Range<usize> = (*first).into();
                    Report::build(ReportKind::Error, (filename, range.clone()))
                        .with_message(format!("duplicate key '{}'", key))
                        .with_label(
                            Label::new((filename, first_range))
                                .with_message("first defined here")
                                .with_color(Color::Blue),
                        )
                        .with_label(
                            Label::new((filename, range))
                                .with_message("duplicate key")
                                .with_color(Color::Red),
                        )
                        .with_help("each key must appear only once in a mapping")
                }

                ParseErrorKind::UnterminatedFlow => {
                    Report::build(ReportKind::Error, (filename, range.clone()))
                        .with_message("unterminated flow collection")
                        .with_label(
                            Label::new((filename, range))
                                .with_message("opened here")
                                .with_color(Color::Red),
                        )
                        .with_help("add the closing ']' or '}'")
                }

                ParseErrorKind::IndentationMismatch { expected, .. } => {
                    Report::build(ReportKind::Error, (filename, range.clone()))
                        .with_message(e.kind.to_string())
                        .with_label(
                            Label::new((filename, range))
                                .with_message("misaligned")
                                .with_color(Color::Red),
                        )
                        .with_help(format!(
                            "entries of this block start at column {}",
                            expected + 1
                        ))
                }

                ParseErrorKind::InvalidMergeValue => {
                    Report::build(ReportKind::Error, (filename, range.clone()))
                        .with_message(e.kind.to_string())
                        .with_label(
                            Label::new((filename, range))
                                .with_message("merge key")
                                .with_color(Color::Red),
                        )
                        .with_help("use '<<: *anchor' or '<<: [*a, *b]'")
                }

                ParseErrorKind::NestingTooDeep(_) => {
                    Report::build(ReportKind::Error, (filename, range.clone()))
                        .with_message(e.kind.to_string())
                        .with_label(
                            Label::new((filename, range))
                                .with_message("too deep")
                                .with_color(Color::Red),
                        )
                        .with_help("raise ParseOptions::max_depth to accept deeper documents")
                }

                kind => Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(kind.to_string())
                    .with_label(
                        Label::new((filename, range))
                            .with_message("here")
                            .with_color(Color::Red),
                    ),
            },

            BuildError::Anchor(e) => {
                let help = match &e.kind {
                    AnchorErrorKind::Undefined(_) => {
                        "anchors must be declared with '&name' before they are used"
                    }
                    AnchorErrorKind::Cycle(_) => {
                        "an alias cannot refer to the node it is part of"
                    }
                };
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(e.kind.to_string())
                    .with_label(
                        Label::new((filename, range))
                            .with_message(format!("alias '{}'", e.name()))
                            .with_color(Color::Red),
                    )
                    .with_help(help)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParseOptions, Parser};

    fn render(source: &str) -> String {
        let err = Parser::new(source, ParseOptions::default())
            .parse()
            .unwrap_err();
        let rendered = err.render("test.yaml", source);
        String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
    }

    #[test]
    fn test_duplicate_key_diagnostic() {
        let output = render("a: 1\nb: 2\na: 3");
        assert!(output.contains("duplicate key 'a'"), "{output}");
        assert!(output.contains("first defined here"), "{output}");
        assert!(output.contains("test.yaml"), "{output}");
    }

    #[test]
    fn test_tab_diagnostic() {
        let output = render("a:\n\tb: 1");
        assert!(output.contains("tab character used for indentation"), "{output}");
        assert!(output.contains("indent with spaces"), "{output}");
    }

    #[test]
    fn test_undefined_alias_diagnostic() {
        let output = render("a: *missing");
        assert!(output.contains("undefined anchor 'missing'"), "{output}");
        assert!(output.contains("alias 'missing'"), "{output}");
    }

    #[test]
    fn test_unterminated_flow_diagnostic() {
        let output = render("list: [1, 2");
        assert!(output.contains("unterminated flow collection"), "{output}");
        assert!(output.contains("opened here"), "{output}");
    }
}
