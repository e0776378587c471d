//! Oracle validation: the last veto before an oracle is recorded.
//!
//! `Ok(false)` rejects one oracle and leaves the sentence unresolved.
//! `Err` means the validator itself failed, which fails the member.

use std::io::{ErrorKind, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::config::SynthesisConfig;
use crate::core::errors::{DocOracleError, Result};
use crate::model::member::DocumentedMember;

/// Confirms a synthesized oracle is well-formed in its member's context.
pub trait OracleValidator: Send + Sync {
    fn validate(&self, member: &DocumentedMember, oracle: &str, guard: &str) -> Result<bool>;
}

impl<F> OracleValidator for F
where
    F: Fn(&DocumentedMember, &str, &str) -> Result<bool> + Send + Sync,
{
    fn validate(&self, member: &DocumentedMember, oracle: &str, guard: &str) -> Result<bool> {
        self(member, oracle, guard)
    }
}

/// Static well-formedness check.
///
/// Accepts an oracle when its delimiters balance outside literals, it
/// mentions the result placeholder, and every argument placeholder refers
/// to an existing parameter.
#[derive(Debug, Clone)]
pub struct SyntaxValidator {
    result_placeholder: String,
    argument: Regex,
}

impl SyntaxValidator {
    pub fn new(synthesis: &SynthesisConfig) -> Result<Self> {
        let pattern = regex::escape(&synthesis.argument_placeholder)
            .replace(r"\{index\}", r"(\d+)");
        Ok(Self {
            result_placeholder: synthesis.result_placeholder.clone(),
            argument: Regex::new(&pattern)?,
        })
    }
}

impl OracleValidator for SyntaxValidator {
    fn validate(&self, member: &DocumentedMember, oracle: &str, guard: &str) -> Result<bool> {
        if !oracle.contains(&self.result_placeholder) {
            debug!(oracle, "result placeholder missing");
            return Ok(false);
        }
        if !balanced(oracle) || !balanced(guard) {
            debug!(oracle, "unbalanced delimiters");
            return Ok(false);
        }
        let arity = member.parameters().len();
        let in_range = [oracle, guard].iter().all(|text| {
            self.argument.captures_iter(text).all(|caps| {
                caps.get(1)
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                    .is_some_and(|index| index < arity)
            })
        });
        if !in_range {
            debug!(oracle, arity, "argument placeholder out of range");
        }
        Ok(in_range)
    }
}

fn balanced(text: &str) -> bool {
    let mut stack = Vec::new();
    let mut chars = text.chars();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == '\\' {
                chars.next();
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let open = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(open) {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty() && quote.is_none()
}

#[derive(Serialize)]
struct ValidationRequest<'a> {
    member: String,
    declaring_type: &'a str,
    return_type: &'a str,
    parameters: Vec<&'a str>,
    oracle: &'a str,
    guard: &'a str,
}

/// Delegates to an external program.
///
/// The program receives a JSON request on stdin and accepts the oracle by
/// exiting with status 0. Runs past the timeout are killed and count as a
/// rejection.
#[derive(Debug, Clone)]
pub struct CommandValidator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandValidator {
    pub fn new(command: &[String], timeout: Duration) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .filter(|(p, _)| !p.trim().is_empty())
            .ok_or_else(|| DocOracleError::config_field("validator command cannot be empty", "validation.command"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    fn request(member: &DocumentedMember, oracle: &str, guard: &str) -> Result<Vec<u8>> {
        let request = ValidationRequest {
            member: member.signature(),
            declaring_type: member.declaring_type().as_str(),
            return_type: member.return_type().as_str(),
            parameters: member.parameters().iter().map(|p| p.type_name.as_str()).collect(),
            oracle,
            guard,
        };
        Ok(serde_json::to_vec(&request)?)
    }
}

impl OracleValidator for CommandValidator {
    fn validate(&self, member: &DocumentedMember, oracle: &str, guard: &str) -> Result<bool> {
        let payload = Self::request(member, oracle, guard)?;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                DocOracleError::collaborator("validator", format!("failed to start '{}': {}", self.program, e))
                    .with_context(member.signature())
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // a validator may decide without reading its input
            if let Err(e) = stdin.write_all(&payload) {
                if e.kind() != ErrorKind::BrokenPipe {
                    reap(&mut child);
                    return Err(DocOracleError::io("failed to send validation request", e));
                }
            }
        }

        match wait_with_timeout(&mut child, self.timeout) {
            Ok(Some(status)) => Ok(status.success()),
            Ok(None) => {
                warn!(
                    member = %member,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "validator timed out; rejecting oracle"
                );
                reap(&mut child);
                Ok(false)
            }
            Err(e) => {
                reap(&mut child);
                Err(e)
            }
        }
    }
}

// Kill and wait so no validator process outlives its request.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child
            .try_wait()
            .map_err(|e| DocOracleError::io("failed to poll validator", e))?
        {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            return Ok(None);
        }
        thread::sleep(Duration::from_millis(10));
    }
}

/// Accepts only when every inner validator accepts, consulting them in order.
#[derive(Clone, Default)]
pub struct ChainValidator {
    validators: Vec<Arc<dyn OracleValidator>>,
}

impl ChainValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, validator: Arc<dyn OracleValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl OracleValidator for ChainValidator {
    fn validate(&self, member: &DocumentedMember, oracle: &str, guard: &str) -> Result<bool> {
        for validator in &self.validators {
            if !validator.validate(member, oracle, guard)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
