//! Sources of `G(n, p)` parameters for the CLI.
//!
//! Each field is validated on its own. Unparsable or out-of-range input is
//! reported and replaced by that field's default, so a bad `p` never discards
//! a good `n`.

use std::fmt;
use std::io::{self, BufRead, Write};

use renyi_core::{
    DEFAULT_NODES, DEFAULT_PROBABILITY, GraphParams, ParameterError, validate_probability,
    validate_signed_nodes,
};
use thiserror::Error;
use tracing::{instrument, warn};

use crate::cli::CliError;

/// Produces validated graph parameters.
pub trait ParameterSource {
    /// Returns the parameters for the next analysis.
    ///
    /// # Errors
    /// Returns [`CliError`] when the source itself fails, for example when
    /// reading from the prompt input errors. Invalid values are not errors.
    fn acquire(&mut self) -> Result<GraphParams, CliError>;
}

/// The parameter a rejected value was supplied for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterField {
    /// Node count `n`.
    Nodes,
    /// Edge probability `p`.
    Probability,
}

impl ParameterField {
    fn label(self) -> &'static str {
        match self {
            Self::Nodes => "node count",
            Self::Probability => "edge probability",
        }
    }

    fn default_text(self) -> String {
        match self {
            Self::Nodes => DEFAULT_NODES.to_string(),
            Self::Probability => DEFAULT_PROBABILITY.to_string(),
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a user-supplied value was rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputRejection {
    /// The text is not a number of the expected kind.
    #[error("`{raw}` is not a valid number")]
    Unparsable {
        /// Trimmed input text.
        raw: String,
    },
    /// The number parsed but is outside the accepted range.
    #[error(transparent)]
    OutOfRange(#[from] ParameterError),
}

/// A rejected value together with the default substituted for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterNotice {
    /// Field the value was supplied for.
    pub field: ParameterField,
    /// Reason the value was rejected.
    pub rejection: InputRejection,
}

impl fmt::Display for ParameterNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}: {}; using default {}",
            self.field,
            self.rejection,
            self.field.default_text()
        )
    }
}

/// Validated parameters plus any substitutions made along the way.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedParameters {
    /// Parameters to analyse.
    pub params: GraphParams,
    /// One entry per field that fell back to its default.
    pub notices: Vec<ParameterNotice>,
}

/// Resolves raw text for `n` and `p` into parameters.
///
/// `None` or blank text selects the field's default without a notice.
///
/// # Examples
/// ```
/// use renyi_cli::params::resolve_parameters;
///
/// let resolved = resolve_parameters(Some("12"), Some("2.5"));
/// assert_eq!(resolved.params.nodes().get(), 12);
/// assert_eq!(resolved.params.probability(), 0.01);
/// assert_eq!(resolved.notices.len(), 1);
/// ```
#[must_use]
pub fn resolve_parameters(nodes: Option<&str>, probability: Option<&str>) -> ResolvedParameters {
    let mut notices = Vec::new();

    let nodes = match parse_nodes(nodes) {
        Ok(value) => value,
        Err(rejection) => {
            notices.push(ParameterNotice {
                field: ParameterField::Nodes,
                rejection,
            });
            DEFAULT_NODES
        }
    };
    let probability = match parse_probability(probability) {
        Ok(value) => value,
        Err(rejection) => {
            notices.push(ParameterNotice {
                field: ParameterField::Probability,
                rejection,
            });
            DEFAULT_PROBABILITY
        }
    };

    let params = GraphParams::new(nodes, probability).unwrap_or_default();
    ResolvedParameters { params, notices }
}

fn blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|text| !text.is_empty())
}

fn parse_nodes(raw: Option<&str>) -> Result<usize, InputRejection> {
    let Some(text) = blank(raw) else {
        return Ok(DEFAULT_NODES);
    };
    let parsed = text.parse::<i64>().map_err(|_| InputRejection::Unparsable {
        raw: text.to_owned(),
    })?;
    Ok(validate_signed_nodes(parsed)?.get())
}

fn parse_probability(raw: Option<&str>) -> Result<f64, InputRejection> {
    let Some(text) = blank(raw) else {
        return Ok(DEFAULT_PROBABILITY);
    };
    let parsed = text.parse::<f64>().map_err(|_| InputRejection::Unparsable {
        raw: text.to_owned(),
    })?;
    Ok(validate_probability(parsed)?)
}

fn log_notices(notices: &[ParameterNotice]) {
    for notice in notices {
        warn!(field = %notice.field, reason = %notice.rejection, "substituted default parameter");
    }
}

/// Parameters supplied as command-line flags.
#[derive(Clone, Debug, Default)]
pub struct ArgumentParameters {
    nodes: Option<String>,
    probability: Option<String>,
}

impl ArgumentParameters {
    /// Wraps the raw flag values; `None` selects the default.
    #[must_use]
    pub fn new(nodes: Option<String>, probability: Option<String>) -> Self {
        Self { nodes, probability }
    }
}

impl ParameterSource for ArgumentParameters {
    #[instrument(name = "cli.params.arguments", skip(self))]
    fn acquire(&mut self) -> Result<GraphParams, CliError> {
        let resolved = resolve_parameters(self.nodes.as_deref(), self.probability.as_deref());
        log_notices(&resolved.notices);
        Ok(resolved.params)
    }
}

/// Parameters typed in response to prompts.
///
/// Prompts and rejection messages are written to `output`; answers are read
/// one line each from `input`. End of input counts as an empty answer.
pub struct PromptParameters<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptParameters<R, W> {
    /// Creates a prompt over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = Vec::new();
        self.input.read_until(b'\n', &mut line)?;
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    fn read(&mut self) -> io::Result<ResolvedParameters> {
        writeln!(self.output, "Erdős–Rényi graph parameters")?;
        let nodes = self.ask(&format!("number of nodes (n) [{DEFAULT_NODES}]: "))?;
        let probability = self.ask(&format!("edge probability (p) [{DEFAULT_PROBABILITY}]: "))?;
        let resolved = resolve_parameters(Some(&nodes), Some(&probability));
        for notice in &resolved.notices {
            writeln!(self.output, "{notice}")?;
        }
        Ok(resolved)
    }
}

impl<R: BufRead, W: Write> ParameterSource for PromptParameters<R, W> {
    #[instrument(name = "cli.params.prompt", err, skip(self))]
    fn acquire(&mut self) -> Result<GraphParams, CliError> {
        let resolved = self
            .read()
            .map_err(|source| CliError::Prompt { source })?;
        log_notices(&resolved.notices);
        Ok(resolved.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use rstest::rstest;

    #[rstest]
    #[case::both_missing(None, None, 50, 0.01)]
    #[case::blank(Some("  "), Some(""), 50, 0.01)]
    #[case::valid(Some("7"), Some("0.5"), 7, 0.5)]
    #[case::padded(Some(" 12\n"), Some("1\n"), 12, 1.0)]
    #[case::probability_bounds(Some("3"), Some("0"), 3, 0.0)]
    fn resolves_without_notices(
        #[case] nodes: Option<&str>,
        #[case] probability: Option<&str>,
        #[case] expected_nodes: usize,
        #[case] expected_probability: f64,
    ) {
        let resolved = resolve_parameters(nodes, probability);
        assert!(resolved.notices.is_empty());
        assert_eq!(resolved.params.nodes().get(), expected_nodes);
        assert_eq!(resolved.params.probability(), expected_probability);
    }

    #[rstest]
    #[case::zero_nodes("0")]
    #[case::negative_nodes("-4")]
    #[case::fractional_nodes("2.5")]
    #[case::text_nodes("many")]
    #[case::huge_nodes("100001")]
    fn invalid_node_count_falls_back_alone(#[case] raw: &str) {
        let resolved = resolve_parameters(Some(raw), Some("0.3"));
        assert_eq!(resolved.params.nodes().get(), DEFAULT_NODES);
        assert_eq!(resolved.params.probability(), 0.3);
        assert_eq!(resolved.notices.len(), 1);
        assert_eq!(resolved.notices[0].field, ParameterField::Nodes);
    }

    #[rstest]
    #[case::above_one("1.5")]
    #[case::negative("-0.1")]
    #[case::not_a_number("NaN")]
    #[case::text("often")]
    fn invalid_probability_falls_back_alone(#[case] raw: &str) {
        let resolved = resolve_parameters(Some("9"), Some(raw));
        assert_eq!(resolved.params.nodes().get(), 9);
        assert_eq!(resolved.params.probability(), DEFAULT_PROBABILITY);
        assert_eq!(resolved.notices.len(), 1);
        assert_eq!(resolved.notices[0].field, ParameterField::Probability);
    }

    #[test]
    fn notice_names_field_reason_and_default() {
        let resolved = resolve_parameters(Some("-3"), None);
        assert_eq!(
            resolved.notices[0].to_string(),
            "invalid node count: node count must be positive (got -3); using default 50"
        );
        assert!(matches!(
            resolved.notices[0].rejection,
            InputRejection::OutOfRange(ParameterError::NonPositiveNodeCount { got: -3 })
        ));
    }

    #[test]
    fn oversized_node_count_is_rejected_not_allocated() {
        let resolved = resolve_parameters(Some("99999999999"), None);
        assert_eq!(resolved.params.nodes().get(), DEFAULT_NODES);
        assert_eq!(resolved.notices.len(), 1);
        assert_eq!(resolved.notices[0].field, ParameterField::Nodes);
        assert!(matches!(
            resolved.notices[0].rejection,
            InputRejection::OutOfRange(ParameterError::NodeCountTooLarge {
                got: 99_999_999_999,
                max: renyi_core::MAX_NODES,
            })
        ));
    }

    #[test]
    fn argument_source_uses_flags() {
        let mut source = ArgumentParameters::new(Some("8".into()), None);
        let params = source.acquire().expect("arguments never fail");
        assert_eq!(params.nodes().get(), 8);
        assert_eq!(params.probability(), DEFAULT_PROBABILITY);
    }

    #[test]
    fn prompt_source_reads_two_lines() {
        let mut output = Vec::new();
        let params = PromptParameters::new(Cursor::new("20\n0.25\n"), &mut output)
            .acquire()
            .expect("prompt must succeed");
        assert_eq!(params.nodes().get(), 20);
        assert_eq!(params.probability(), 0.25);

        let transcript = String::from_utf8(output).expect("prompt output is UTF-8");
        assert!(transcript.contains("number of nodes (n) [50]: "));
        assert!(transcript.contains("edge probability (p) [0.01]: "));
        assert!(!transcript.contains("invalid"));
    }

    #[test]
    fn prompt_source_reports_rejections_on_its_writer() {
        let mut output = Vec::new();
        let params = PromptParameters::new(Cursor::new("abc\n2\n"), &mut output)
            .acquire()
            .expect("prompt must succeed");
        assert_eq!(params, GraphParams::default());

        let transcript = String::from_utf8(output).expect("prompt output is UTF-8");
        assert!(transcript.contains("invalid node count: `abc` is not a valid number"));
        assert!(transcript.contains("invalid edge probability"));
    }

    #[test]
    fn prompt_source_treats_end_of_input_as_defaults() {
        let mut output = Vec::new();
        let params = PromptParameters::new(Cursor::new(""), &mut output)
            .acquire()
            .expect("prompt must succeed");
        assert_eq!(params, GraphParams::default());
    }

    struct BrokenReader;

    impl io::Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stdin closed"))
        }
    }

    #[test]
    fn prompt_source_surfaces_read_failures() {
        let mut output = Vec::new();
        let err = PromptParameters::new(io::BufReader::new(BrokenReader), &mut output)
            .acquire()
            .expect_err("read failure must propagate");
        assert!(matches!(err, CliError::Prompt { .. }));
    }

    #[test]
    fn prompt_source_replaces_undecodable_answer() {
        let mut output = Vec::new();
        let params = PromptParameters::new(Cursor::new(&b"\xff\xfe\n0.5\n"[..]), &mut output)
            .acquire()
            .expect("undecodable bytes are an invalid answer, not a read failure");
        assert_eq!(params.nodes().get(), DEFAULT_NODES);
        assert_eq!(params.probability(), 0.5);

        let transcript = String::from_utf8(output).expect("prompt output is UTF-8");
        assert!(transcript.contains("invalid node count"));
    }
}
