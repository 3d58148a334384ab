use winnow::ascii::till_line_ending;
use winnow::combinator::{
    alt, cut_err, delimited, fail, not, opt, preceded, repeat, separated, terminated,
};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use crate::Direction;

use super::parser::{ListSource, Operation, ParsedContent, Statement};

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers & attribute paths ------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// `a.b.c`, returned segment by segment.
fn path<'i>(input: &mut &'i str) -> ModalResult<Vec<&'i str>> {
    separated(1.., ident, '.').parse_next(input)
}

/// Split `Block.Name.outputCommands` into (`Block.Name`, direction).
fn commands_target(segments: &[&str]) -> Option<(String, Direction)> {
    let (attribute, block) = segments.split_last()?;
    let direction = Direction::from_attribute(attribute)?;
    if block.is_empty() {
        return None;
    }
    Some((block.join("."), direction))
}

// -- Strings & lists --------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    let quote = one_of(['\'', '"']).parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = cut_err(any)
            .context(StrContext::Expected(StrContextValue::Description(
                "closing quote",
            )))
            .parse_next(input)?;
        match ch {
            '\\' => {
                let esc = cut_err(any).parse_next(input)?;
                match esc {
                    '\'' => s.push('\''),
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            '\n' => return reject(input, "closing quote on the same line"),
            c if c == quote => return Ok(s),
            c => s.push(c),
        }
    }
}

/// Comma-separated strings; a trailing comma is allowed.
fn string_items(input: &mut &str) -> ModalResult<Vec<String>> {
    let mut items = Vec::new();
    loop {
        ws.parse_next(input)?;
        match opt(string_literal).parse_next(input)? {
            Some(item) => items.push(item),
            None => break,
        }
        ws.parse_next(input)?;
        if opt(',').parse_next(input)?.is_none() {
            break;
        }
    }
    ws.parse_next(input)?;
    Ok(items)
}

fn list_literal(input: &mut &str) -> ModalResult<Vec<String>> {
    delimited(
        '[',
        string_items,
        cut_err(']').context(StrContext::Expected(StrContextValue::CharLiteral(']'))),
    )
    .parse_next(input)
}

/// `cms.vstring(...)` / `cms.untracked.vstring(...)` wrapping a list or bare strings.
fn vstring_call(input: &mut &str) -> ModalResult<Vec<String>> {
    path.verify_map(|segments: Vec<&str>| (segments.last() == Some(&"vstring")).then_some(()))
        .parse_next(input)?;
    ws.parse_next(input)?;
    cut_err('(').parse_next(input)?;
    ws.parse_next(input)?;
    let items = alt((list_literal, string_items)).parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(')')
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;
    Ok(items)
}

fn list_expr(input: &mut &str) -> ModalResult<Vec<String>> {
    ws.parse_next(input)?;
    alt((list_literal, vstring_call))
        .context(StrContext::Expected(StrContextValue::Description(
            "command list",
        )))
        .parse_next(input)
}

fn block_ref(input: &mut &str) -> ModalResult<ListSource> {
    ws.parse_next(input)?;
    path.verify_map(|segments: Vec<&str>| commands_target(&segments))
        .map(|(block, direction)| ListSource::Block { block, direction })
        .parse_next(input)
}

fn list_source(input: &mut &str) -> ModalResult<ListSource> {
    alt((list_expr.map(ListSource::Literal), block_ref)).parse_next(input)
}

// -- Statements -------------------------------------------------------------

/// Fail without backtracking, naming what was expected at this position.
fn reject<O>(input: &mut &str, expected: &'static str) -> ModalResult<O> {
    cut_err(fail)
        .context(StrContext::Label("statement"))
        .context(StrContext::Expected(StrContextValue::Description(expected)))
        .parse_next(input)
}

fn commands_assignment(
    block: String,
    direction: Direction,
    input: &mut &str,
) -> ModalResult<Statement> {
    let commands = cut_err(list_expr).parse_next(input)?;
    Ok(Statement {
        block,
        direction,
        op: Operation::Assign(commands),
    })
}

/// Skip one call argument up to the next top-level `,` or `)`.
fn opaque_value(input: &mut &str) -> ModalResult<()> {
    let start = input.len();
    let mut depth = 0usize;
    loop {
        match input.chars().next() {
            None => return reject(input, "closing `)` of call"),
            Some(',' | ')') if depth == 0 => break,
            Some('\'' | '"') => string_literal.void().parse_next(input)?,
            Some('#') => ('#', till_line_ending).void().parse_next(input)?,
            Some('(' | '[' | '{') => {
                depth += 1;
                any.void().parse_next(input)?;
            }
            Some(')' | ']' | '}') => {
                if depth == 0 {
                    return reject(input, "balanced brackets");
                }
                depth -= 1;
                any.void().parse_next(input)?;
            }
            Some(_) => any.void().parse_next(input)?,
        }
    }
    if input.len() == start {
        return reject(input, "argument value");
    }
    Ok(())
}

/// `name = cms.OutputModule('PoolOutputModule', ..., outputCommands = ...)`.
///
/// Only `outputCommands` / `inputCommands` keyword arguments produce
/// statements; every other argument is skipped.
fn module_call(block: &str, input: &mut &str) -> ModalResult<Vec<Statement>> {
    if path.parse_next(input).is_err() {
        return reject(input, "command list or configuration call");
    }
    ws.parse_next(input)?;
    cut_err('(')
        .context(StrContext::Expected(StrContextValue::CharLiteral('(')))
        .parse_next(input)?;

    let mut statements = Vec::new();
    loop {
        ws.parse_next(input)?;
        if input.starts_with(')') {
            break;
        }

        let keyword = opt(terminated(ident, (ws, '=', not('=')))).parse_next(input)?;
        ws.parse_next(input)?;
        match keyword.and_then(Direction::from_attribute) {
            Some(direction) => {
                statements.push(commands_assignment(block.to_owned(), direction, input)?);
            }
            None => opaque_value(input)?,
        }

        ws.parse_next(input)?;
        if opt(',').parse_next(input)?.is_none() {
            break;
        }
    }

    cut_err(')')
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;
    Ok(statements)
}

fn assignment(segments: &[&str], input: &mut &str) -> ModalResult<Vec<Statement>> {
    ws.parse_next(input)?;
    match commands_target(segments) {
        Some((block, direction)) => Ok(vec![commands_assignment(block, direction, input)?]),
        None => module_call(&segments.join("."), input),
    }
}

fn method_call(segments: &[&str], input: &mut &str) -> ModalResult<Statement> {
    let Some((method, receiver)) = segments.split_last() else {
        return reject(input, "method name");
    };
    let Some((block, direction)) = commands_target(receiver) else {
        return reject(input, "`outputCommands` or `inputCommands` receiver");
    };

    let op = match *method {
        "append" => {
            let line = cut_err(preceded(ws, string_literal))
                .context(StrContext::Expected(StrContextValue::Description(
                    "quoted command",
                )))
                .parse_next(input)?;
            Operation::Append(line)
        }
        "extend" => {
            let source = cut_err(list_source)
                .context(StrContext::Expected(StrContextValue::Description(
                    "command list or block reference",
                )))
                .parse_next(input)?;
            Operation::Extend(source)
        }
        _ => return reject(input, "`append` or `extend`"),
    };

    ws.parse_next(input)?;
    cut_err(')')
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;

    Ok(Statement {
        block,
        direction,
        op,
    })
}

fn statement(input: &mut &str) -> ModalResult<Vec<Statement>> {
    ws.parse_next(input)?;
    let segments = path.parse_next(input)?;
    ws.parse_next(input)?;

    if opt('=').parse_next(input)?.is_some() {
        assignment(&segments, input)
    } else if opt('(').parse_next(input)?.is_some() {
        Ok(vec![method_call(&segments, input)?])
    } else {
        reject(input, "`=` or `(` after block path")
    }
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_content(input: &mut &str) -> ModalResult<ParsedContent> {
    let statements = repeat(0.., statement)
        .fold(Vec::new, |mut all: Vec<Statement>, batch| {
            all.extend(batch);
            all
        })
        .parse_next(input)?;
    ws.parse_next(input)?;
    Ok(ParsedContent { statements })
}
