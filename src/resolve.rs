use tracing::debug;

use crate::parse::{ListSource, Operation, ParsedContent};
use crate::types::{ContentBlock, ContentConfig, ContentError, Direction, RuleList};

struct PendingBlock {
    name: String,
    direction: Direction,
    commands: Vec<String>,
}

/// Apply statements in source order, then compile every block.
///
/// `extend` from another block copies that block's commands as they stand at
/// that statement; later changes to the source block are not seen.
pub(crate) fn resolve(parsed: ParsedContent) -> Result<ContentConfig, ContentError> {
    let mut pending: Vec<PendingBlock> = Vec::new();

    for statement in parsed.statements {
        let position = pending
            .iter()
            .position(|b| b.name == statement.block && b.direction == statement.direction);

        match statement.op {
            Operation::Assign(commands) => match position {
                Some(idx) => pending[idx].commands = commands,
                None => pending.push(PendingBlock {
                    name: statement.block,
                    direction: statement.direction,
                    commands,
                }),
            },
            Operation::Append(line) => {
                let idx = position.ok_or_else(|| undefined(&statement.block))?;
                pending[idx].commands.push(line);
            }
            Operation::Extend(source) => {
                let idx = position.ok_or_else(|| undefined(&statement.block))?;
                let extra = match source {
                    ListSource::Literal(commands) => commands,
                    ListSource::Block { block, direction } => pending
                        .iter()
                        .find(|b| b.name == block && b.direction == direction)
                        .map(|b| b.commands.clone())
                        .ok_or_else(|| undefined(&block))?,
                };
                pending[idx].commands.extend(extra);
            }
        }
    }

    let blocks = pending
        .into_iter()
        .map(|block| {
            let rules = RuleList::parse(&block.commands).map_err(|source| ContentError::Rule {
                block: block.name.clone(),
                source,
            })?;
            Ok(ContentBlock {
                name: block.name,
                direction: block.direction,
                rules,
            })
        })
        .collect::<Result<Vec<_>, ContentError>>()?;

    debug!(
        blocks = blocks.len(),
        rules = blocks.iter().map(|b| b.rules.len()).sum::<usize>(),
        "loaded content configuration"
    );

    Ok(ContentConfig { blocks })
}

fn undefined(block: &str) -> ContentError {
    ContentError::UndefinedBlock {
        block: block.to_owned(),
    }
}
