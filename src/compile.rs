use tracing::debug;

use crate::types::{Action, Field, MalformedRuleError, MalformedRuleKind, Pattern, Rule, RuleList};

const FIELD_COUNT: usize = 4;

/// Compile an ordered sequence of command lines into a [`RuleList`].
///
/// Fails on the first malformed line; no partial list is ever produced.
pub(crate) fn compile<I, S>(lines: I) -> Result<RuleList, MalformedRuleError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rules = lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| compile_rule(line.as_ref(), index))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        rules = rules.len(),
        universal = rules.iter().filter(|r| r.pattern.is_universal()).count(),
        "compiled rule list"
    );

    Ok(RuleList { rules })
}

pub(crate) fn compile_rule(line: &str, source_index: usize) -> Result<Rule, MalformedRuleError> {
    let malformed = |kind: MalformedRuleKind| MalformedRuleError {
        index: source_index,
        line: line.to_owned(),
        kind,
    };

    let mut tokens = line.split_ascii_whitespace();
    let keyword = tokens.next().ok_or_else(|| malformed(MalformedRuleKind::Empty))?;
    let action = Action::from_keyword(keyword).ok_or_else(|| {
        malformed(MalformedRuleKind::UnknownAction {
            action: keyword.to_owned(),
        })
    })?;

    let rest: Vec<&str> = tokens.collect();
    let pattern_text = match rest.as_slice() {
        [] => {
            return Err(malformed(MalformedRuleKind::MissingPattern {
                action: keyword.to_owned(),
            }))
        }
        [single] => *single,
        many => {
            return Err(malformed(MalformedRuleKind::MultiplePatterns {
                count: many.len(),
            }))
        }
    };

    let pattern = compile_pattern(pattern_text).map_err(malformed)?;

    Ok(Rule {
        action,
        pattern,
        source_index,
        line: line.to_owned(),
    })
}

/// Split a pattern on `_` into exactly four fields, padding with wildcards.
fn compile_pattern(text: &str) -> Result<Pattern, MalformedRuleKind> {
    if text == "*" {
        return Ok(Pattern::any());
    }

    let parts: Vec<&str> = text.split('_').collect();
    if parts.len() > FIELD_COUNT {
        return Err(MalformedRuleKind::TooManyFields { count: parts.len() });
    }

    let mut fields = [
        Field::Wildcard,
        Field::Wildcard,
        Field::Wildcard,
        Field::Wildcard,
    ];
    for (slot, part) in fields.iter_mut().zip(parts) {
        *slot = compile_field(part)?;
    }
    Ok(Pattern::new(fields))
}

fn compile_field(part: &str) -> Result<Field, MalformedRuleKind> {
    if part == "*" {
        return Ok(Field::Wildcard);
    }
    if part.contains(['*', '?']) {
        return Err(MalformedRuleKind::UnsupportedGlob {
            field: part.to_owned(),
        });
    }
    Ok(Field::Literal(part.to_owned()))
}
