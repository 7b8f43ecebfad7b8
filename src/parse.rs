use crate::{error::CommandError, error::LoadError, Atom, Rule};
use nom::{
    bytes::complete::{tag, take_till1, take_while},
    character::complete::{multispace0, satisfy},
    combinator::{all_consuming, map as nommap, recognize},
    error::ParseError,
    multi::{many0, separated_list1},
    sequence::{pair, preceded, separated_pair, terminated},
};
use std::path::{Path, PathBuf};
pub type IResult<I, O, E = nom::error::VerboseError<I>> = Result<(I, O), nom::Err<E>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw arguments; validated by the knowledge base.
    Tell(Vec<String>),
    Load(PathBuf),
    InferAll,
    Exit,
}

//////////////////////////////////////

type In<'a> = &'a str;

pub fn wsl<'a, F, O, E>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O, E>
where
    E: ParseError<In<'a>>,
    F: FnMut(In<'a>) -> IResult<In<'a>, O, E> + 'a,
{
    preceded(multispace0, inner)
}

pub fn wsr<'a, F, O, E>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O, E>
where
    E: ParseError<In<'a>>,
    F: FnMut(In<'a>) -> IResult<In<'a>, O, E> + 'a,
{
    terminated(inner, multispace0)
}

/// Succeeds only if `inner` consumes everything but trailing whitespace.
pub fn ended<'a, F, O, E>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O, E>
where
    E: ParseError<In<'a>>,
    F: FnMut(In<'a>) -> IResult<In<'a>, O, E> + 'a,
{
    all_consuming(wsr(inner))
}

fn atom_head(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}
fn atom_tail(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

pub fn atom(s: In) -> IResult<In, In> {
    recognize(pair(satisfy(atom_head), take_while(atom_tail)))(s)
}

pub fn is_atom(s: In) -> bool {
    all_consuming(atom)(s).is_ok()
}

pub fn arrow(s: In) -> IResult<In, In> {
    wsl(tag("<--"))(s)
}

pub fn conj(s: In) -> IResult<In, In> {
    wsl(tag("&"))(s)
}

pub fn rule(s: In) -> IResult<In, Rule> {
    let head = nommap(wsl(atom), Atom::from_parsed);
    let body = separated_list1(conj, nommap(wsl(atom), Atom::from_parsed));
    nommap(separated_pair(head, arrow, body), |(head, body)| Rule { head, body })(s)
}

/// One rule per non-blank line. The first bad line rejects the whole file.
pub fn rule_file(source: &str) -> Result<Vec<Rule>, LoadError> {
    let mut rules = vec![];
    for (lidx, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match ended(rule)(line) {
            Ok((_rest, rule)) => rules.push(rule),
            Err(_) => {
                return Err(LoadError::InvalidRule { line: lidx + 1, text: line.trim().to_owned() })
            }
        }
    }
    Ok(rules)
}

pub fn load_rule_file(path: &Path) -> Result<Vec<Rule>, LoadError> {
    let source = std::fs::read_to_string(path)?;
    rule_file(&source)
}

pub fn words(s: In) -> IResult<In, Vec<In>> {
    many0(preceded(take_while(char::is_whitespace), take_till1(char::is_whitespace)))(s)
}

/// `Ok(None)` for a blank line.
pub fn command(line: &str) -> Result<Option<Command>, CommandError> {
    let words = words(line).map(|(_rest, words)| words).unwrap_or_default();
    let Some((&name, args)) = words.split_first() else {
        return Ok(None);
    };
    let command = match name {
        "tell" => Command::Tell(args.iter().map(|s| s.to_string()).collect()),
        "load" => match args.first() {
            Some(file_name) => Command::Load(PathBuf::from(file_name)),
            None => return Err(CommandError::MissingArgument("load")),
        },
        "infer_all" => Command::InferAll,
        "exit" | "quit" => Command::Exit,
        other => return Err(CommandError::UnknownCommand(other.to_owned())),
    };
    Ok(Some(command))
}
