//! # Command Parsing
//!
//! Turns raw message text into a typed `Command`.
//! Grammar: a leading `/command` token, then command-specific arguments. Weather arguments are
//! comma-separated (`/weather forecast, Rostov on Don, 3`); a dictionary lookup takes the first
//! whitespace-delimited token (`/en_word hello`).

use crate::domain::error::ParseError;
use crate::domain::types::{Command, CommandKind, WeatherQuery};
use regex::Regex;
use std::sync::LazyLock;

static MODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+\b$").expect("mode pattern is valid"));
static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w[\w'-]*").expect("word pattern is valid"));

pub fn parse(raw: &str) -> Result<Command, ParseError> {
    let text = raw.trim();
    if !text.starts_with('/') {
        return Err(ParseError::NotACommand);
    }

    let (head, rest) = match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim()),
        None => (text, ""),
    };

    let kind =
        CommandKind::from_str(head).ok_or_else(|| ParseError::UnknownCommand(head.to_string()))?;

    match kind {
        CommandKind::Start => Ok(Command::Start),
        CommandKind::Help => Ok(Command::Help),
        CommandKind::GetId => Ok(Command::GetId),
        CommandKind::Custom => Ok(Command::Custom),
        CommandKind::Dictionary => parse_word(rest),
        CommandKind::Weather => parse_weather(rest).map(Command::Weather),
    }
}

fn parse_word(rest: &str) -> Result<Command, ParseError> {
    let token = rest
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::malformed(CommandKind::Dictionary, "missing word"))?;

    // Trailing punctuation is dropped: `hello,` looks up `hello`.
    let word = WORD_TOKEN.find(token).ok_or_else(|| {
        ParseError::malformed(CommandKind::Dictionary, format!("`{token}` is not a word"))
    })?;

    Ok(Command::DictionaryLookup {
        word: word.as_str().to_string(),
    })
}

fn parse_weather(rest: &str) -> Result<WeatherQuery, ParseError> {
    let malformed = |reason: &str| ParseError::malformed(CommandKind::Weather, reason);

    let args: Vec<&str> = rest.split(',').map(str::trim).collect();
    if args.len() < 2 {
        return Err(malformed("expected comma-separated arguments"));
    }

    let mode = args[0];
    if !MODE_TOKEN.is_match(mode) {
        return Err(malformed("expected `current` or `forecast`"));
    }

    let location = args[1];
    if location.is_empty() {
        return Err(malformed("missing location"));
    }

    match mode.to_lowercase().as_str() {
        "current" => {
            // A trailing day count is tolerated and ignored.
            if args.len() > 3 {
                return Err(malformed("too many arguments"));
            }
            Ok(WeatherQuery::Current {
                location: location.to_string(),
            })
        }
        "forecast" => {
            if args.len() < 3 || args[2].is_empty() {
                return Err(malformed("missing day count"));
            }
            if args.len() > 3 {
                return Err(malformed("too many arguments"));
            }
            let days = parse_days(args[2]).ok_or_else(|| {
                malformed(&format!(
                    "day count must be between {} and {}",
                    WeatherQuery::MIN_DAYS,
                    WeatherQuery::MAX_DAYS
                ))
            })?;
            Ok(WeatherQuery::Forecast {
                location: location.to_string(),
                days,
            })
        }
        _ => Err(malformed("expected `current` or `forecast`")),
    }
}

fn parse_days(arg: &str) -> Option<u8> {
    arg.parse::<u8>()
        .ok()
        .filter(|d| (WeatherQuery::MIN_DAYS..=WeatherQuery::MAX_DAYS).contains(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(raw: &str) -> WeatherQuery {
        match parse(raw) {
            Ok(Command::Weather(q)) => q,
            other => panic!("expected weather query for {raw:?}, got {other:?}"),
        }
    }

    fn malformed_kind(raw: &str) -> CommandKind {
        parse(raw)
            .expect_err("should not parse")
            .command()
            .expect("should be a malformed known command")
    }

    #[test]
    fn current_weather() {
        assert_eq!(
            weather("/weather current, Paris"),
            WeatherQuery::Current {
                location: "Paris".into()
            }
        );
        assert_eq!(weather("/weather current, Paris").days(), None);
    }

    #[test]
    fn location_keeps_inner_whitespace_and_is_trimmed() {
        assert_eq!(
            weather("  /weather current,    Rostov on Don   "),
            WeatherQuery::Current {
                location: "Rostov on Don".into()
            }
        );
        assert_eq!(
            weather("/weather forecast,New York ,  7 "),
            WeatherQuery::Forecast {
                location: "New York".into(),
                days: 7
            }
        );
    }

    #[test]
    fn forecast_days_range() {
        for days in 1..=14u8 {
            let q = weather(&format!("/weather forecast, Oslo, {days}"));
            assert_eq!(q.days(), Some(days));
            assert_eq!(q.location(), "Oslo");
        }
        for bad in ["0", "15", "-1", "three", "2.5"] {
            assert_eq!(
                malformed_kind(&format!("/weather forecast, Oslo, {bad}")),
                CommandKind::Weather,
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn current_ignores_trailing_day_count() {
        assert_eq!(
            weather("/weather current, Paris, 3"),
            WeatherQuery::Current {
                location: "Paris".into()
            }
        );
    }

    #[test]
    fn malformed_weather_commands() {
        for raw in [
            "/weather",
            "/weather current",
            "/weather current Paris",
            "/weather current,",
            "/weather current,   ",
            "/weather forecast, Rostov",
            "/weather forecast, Rostov,",
            "/weather forecast, Rostov, 3, 4",
            "/weather tomorrow, Paris",
            "/weather current Paris, 3",
            "/weather current, Paris, 3, 4",
        ] {
            assert_eq!(malformed_kind(raw), CommandKind::Weather, "{raw}");
        }
    }

    #[test]
    fn mode_is_case_insensitive() {
        assert_eq!(weather("/weather Forecast, Rome, 2").days(), Some(2));
    }

    #[test]
    fn dictionary_takes_first_token() {
        assert_eq!(
            parse("/en_word Hello there").unwrap(),
            Command::DictionaryLookup {
                word: "Hello".into()
            }
        );
        assert_eq!(
            parse("/en_word don't").unwrap(),
            Command::DictionaryLookup {
                word: "don't".into()
            }
        );
    }

    #[test]
    fn dictionary_drops_trailing_punctuation() {
        for raw in ["/en_word hello,", "/en_word hello!", "/en_word hello?!"] {
            assert_eq!(
                parse(raw).unwrap(),
                Command::DictionaryLookup {
                    word: "hello".into()
                },
                "{raw}"
            );
        }
        assert_eq!(
            parse("/en_word well-being.").unwrap(),
            Command::DictionaryLookup {
                word: "well-being".into()
            }
        );
    }

    #[test]
    fn dictionary_requires_a_word() {
        assert_eq!(malformed_kind("/en_word"), CommandKind::Dictionary);
        assert_eq!(malformed_kind("/en_word    "), CommandKind::Dictionary);
        assert_eq!(malformed_kind("/en_word ???"), CommandKind::Dictionary);
    }

    #[test]
    fn static_commands() {
        assert_eq!(parse("/start").unwrap(), Command::Start);
        assert_eq!(parse("/help me").unwrap(), Command::Help);
        assert_eq!(parse("/get_id").unwrap(), Command::GetId);
        assert_eq!(parse("/custom stuff").unwrap(), Command::Custom);
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse("hello bot"), Err(ParseError::NotACommand));
        assert_eq!(parse(""), Err(ParseError::NotACommand));
        assert_eq!(
            parse("/unknown stuff"),
            Err(ParseError::UnknownCommand("/unknown".into()))
        );
        assert_eq!(
            parse("/weathercurrent, Paris"),
            Err(ParseError::UnknownCommand("/weathercurrent,".into()))
        );
    }
}
