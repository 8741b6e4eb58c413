use nom::{
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, one_of},
    combinator::{map, opt},
    sequence::{preceded, tuple},
    IResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Roll(String),
    Ping,
    Help,
    LongHelp,
    Uptime,
    Kill,
    Restart,
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// Nick comparison used for targeted commands: case and whitespace are ignored.
pub fn similar(nick: &str, other: &str) -> bool {
    fn normalize(nick: &str) -> String {
        nick.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(|c| c.to_lowercase())
            .collect()
    }
    normalize(nick) == normalize(other)
}

/// `!roll`, `/roll`, `!r` or `/r`, then whitespace, then the rest of the line.
fn parse_roll(input: &str) -> IResult<&str, Command> {
    map(
        preceded(
            tuple((one_of("!/"), char('r'), opt(tag("oll")), take_while1(is_whitespace))),
            take_while(|c: char| c != '\n'),
        ),
        |args: &str| Command::Roll(args.to_owned()),
    )(input)
}

/// `!name` followed by its arguments.
fn parse_general(input: &str) -> IResult<&str, (&str, &str)> {
    tuple((
        preceded(char('!'), take_while1(|c: char| !c.is_whitespace())),
        preceded(take_while(is_whitespace), take_while(|_: char| true)),
    ))(input)
}

fn general_command(name: &str, args: &str, nick: &str) -> Option<Command> {
    let args = args.trim();
    if args.is_empty() {
        return match name {
            "ping" => Some(Command::Ping),
            "help" => Some(Command::Help),
            _ => None,
        };
    }
    let mention = args.strip_prefix('@')?;
    if !similar(mention, nick) {
        return None;
    }
    match name {
        "ping" => Some(Command::Ping),
        "help" => Some(Command::LongHelp),
        "uptime" => Some(Command::Uptime),
        "kill" => Some(Command::Kill),
        "restart" => Some(Command::Restart),
        _ => None,
    }
}

pub fn parse(message: &str, nick: &str) -> Option<Command> {
    if let Ok((_, command)) = parse_roll(message) {
        Some(command)
    } else if let Ok((_, (name, args))) = parse_general(message) {
        general_command(name, args, nick)
    } else {
        None
    }
}

pub fn parse_logging(message: &str, nick: &str) -> Option<Command> {
    let command = parse(message, nick);
    if command.is_some() {
        log::info!("{:?}", &command);
    }
    command
}
